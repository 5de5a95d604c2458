//! Payment records.
//!
//! A [`Payment`] is an immutable ledger entry: once built it is never edited
//! or deleted. Corrections are recorded as new entries of kind
//! [`PaymentKind::Refund`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MemberId, MembershipId, Money, PaymentId, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Money received from the member; lowers the balance.
    #[default]
    Payment,
    /// Money given back to the member; raises the balance.
    Refund,
}

impl PaymentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Refund => "refund",
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Card,
    BankTransfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "bank_transfer" | "transfer" => Ok(Self::BankTransfer),
            "other" => Ok(Self::Other),
            other => Err(EngineError::Validation(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// An immutable ledger entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    id: PaymentId,
    member_id: MemberId,
    membership_id: MembershipId,
    amount: Money,
    kind: PaymentKind,
    method: PaymentMethod,
    timestamp: DateTime<Utc>,
}

impl Payment {
    /// Builds a payment record, rejecting negative amounts.
    ///
    /// References are not checked here; the [`Ledger`](crate::Ledger) checks
    /// them against the registry before appending.
    pub fn new(
        id: PaymentId,
        member_id: MemberId,
        membership_id: MembershipId,
        amount: Money,
        kind: PaymentKind,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let amount = amount.ensure_non_negative("payment amount")?;
        Ok(Self {
            id,
            member_id,
            membership_id,
            amount,
            kind,
            method,
            timestamp,
        })
    }

    pub fn id(&self) -> &PaymentId {
        &self.id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn membership_id(&self) -> &MembershipId {
        &self.membership_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> PaymentKind {
        self.kind
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Effect of this entry on the member's balance.
    pub fn balance_effect(&self) -> Money {
        match self.kind {
            PaymentKind::Payment => -self.amount,
            PaymentKind::Refund => self.amount,
        }
    }
}
