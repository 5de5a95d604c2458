//! The payment ledger.
//!
//! The ledger is an append-only list of [`Payment`]s. It never owns members
//! or memberships: it references them by id and checks those references
//! against a [`Registry`] when a payment is recorded.
//!
//! Balances are never cached. [`Ledger::balance_for`] recomputes them from the
//! registry and the ledger on every call:
//!
//! ```text
//! balance = sum(price of every membership assigned) - sum(payments) + sum(refunds)
//! ```
//!
//! A positive balance is money owed by the member, a negative one is credit.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{
    EngineError, MemberId, MembershipId, Money, Payment, PaymentId, PaymentKind, PaymentMethod,
    Registry, ResultEngine,
};

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    payments: Vec<Payment>,
    ids: HashSet<PaymentId>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records money received from a member for a membership.
    pub fn record_payment(
        &mut self,
        registry: &Registry,
        member_id: &MemberId,
        membership_id: &MembershipId,
        amount: Money,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Payment> {
        self.record(
            registry,
            PaymentKind::Payment,
            member_id,
            membership_id,
            amount,
            method,
            timestamp,
        )
    }

    /// Records money given back to a member, as an offsetting entry.
    pub fn record_refund(
        &mut self,
        registry: &Registry,
        member_id: &MemberId,
        membership_id: &MembershipId,
        amount: Money,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Payment> {
        self.record(
            registry,
            PaymentKind::Refund,
            member_id,
            membership_id,
            amount,
            method,
            timestamp,
        )
    }

    fn record(
        &mut self,
        registry: &Registry,
        kind: PaymentKind,
        member_id: &MemberId,
        membership_id: &MembershipId,
        amount: Money,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Payment> {
        registry.member(member_id)?;
        let membership = registry.membership(membership_id)?;
        let amount = amount.ensure_non_negative("payment amount")?;
        if &membership.member_id != member_id {
            return Err(EngineError::MembershipMismatch(format!(
                "membership {membership_id} belongs to member {}, not {member_id}",
                membership.member_id
            )));
        }

        let id = loop {
            let id = PaymentId::generate();
            if !self.ids.contains(&id) {
                break id;
            }
        };
        let payment = Payment::new(
            id,
            member_id.clone(),
            membership_id.clone(),
            amount,
            kind,
            method,
            timestamp,
        )?;
        self.ensure_totals_fit(registry, &payment)?;
        self.append(payment.clone());
        Ok(payment)
    }

    /// Appends a payment as read from a document.
    ///
    /// References must resolve to live entities, or to ids retired by a
    /// member removal (orphaned history is kept).
    pub(crate) fn restore(&mut self, registry: &Registry, payment: Payment) -> ResultEngine<()> {
        if self.ids.contains(payment.id()) {
            return Err(EngineError::DuplicateIdentifier(format!("payment {}", payment.id())));
        }

        let member_id = payment.member_id();
        let membership_id = payment.membership_id();
        let member_live = registry.member(member_id).is_ok();
        if !member_live && !registry.is_retired_member(member_id) {
            return Err(EngineError::NotFound(format!(
                "member {member_id} of payment {}",
                payment.id()
            )));
        }

        match registry.membership(membership_id) {
            Ok(membership) => {
                if &membership.member_id != member_id {
                    return Err(EngineError::MembershipMismatch(format!(
                        "payment {} names member {member_id} but membership {membership_id} \
                         belongs to {}",
                        payment.id(),
                        membership.member_id
                    )));
                }
            }
            Err(_) => match registry.retired_membership_owner(membership_id) {
                Some(owner) if !member_live && owner == member_id => {}
                Some(owner) if !member_live => {
                    return Err(EngineError::MembershipMismatch(format!(
                        "payment {} names member {member_id} but retired membership \
                         {membership_id} belonged to {owner}",
                        payment.id()
                    )));
                }
                _ => {
                    return Err(EngineError::NotFound(format!(
                        "membership {membership_id} of payment {}",
                        payment.id()
                    )));
                }
            },
        }

        self.ensure_totals_fit(registry, &payment)?;
        self.append(payment);
        Ok(())
    }

    /// Rejects an entry that would push the ledger total, the member's net
    /// paid amount or a live member's balance out of range.
    fn ensure_totals_fit(&self, registry: &Registry, payment: &Payment) -> ResultEngine<()> {
        let effect = payment.balance_effect();
        let member_id = payment.member_id();
        self.total_revenue()?
            .checked_sub(effect)
            .ok_or_else(overflow)?;
        self.net_paid(member_id)?
            .checked_sub(effect)
            .ok_or_else(overflow)?;
        if registry.member(member_id).is_ok() {
            self.balance_for(registry, member_id)?
                .checked_add(effect)
                .ok_or_else(overflow)?;
        }
        Ok(())
    }

    fn append(&mut self, payment: Payment) {
        self.ids.insert(payment.id().clone());
        self.payments.push(payment);
    }

    /// Outstanding balance of a live member.
    ///
    /// Independent of the order payments were recorded in.
    pub fn balance_for(&self, registry: &Registry, member_id: &MemberId) -> ResultEngine<Money> {
        let mut balance = Money::ZERO;
        for membership in registry.memberships_for_member(member_id)? {
            let price = registry.membership_price(&membership.id)?;
            balance = balance.checked_add(price).ok_or_else(overflow)?;
        }
        for payment in self.entries_for(member_id) {
            balance = balance
                .checked_add(payment.balance_effect())
                .ok_or_else(overflow)?;
        }
        Ok(balance)
    }

    /// The member's ledger entries ordered by timestamp; ties keep recording
    /// order.
    ///
    /// Works for removed members too, returning their retained history.
    pub fn statement_for(
        &self,
        registry: &Registry,
        member_id: &MemberId,
    ) -> ResultEngine<Vec<&Payment>> {
        if registry.member(member_id).is_err() && !registry.is_retired_member(member_id) {
            return Err(EngineError::NotFound(format!("member {member_id}")));
        }
        let mut entries: Vec<&Payment> = self.entries_for(member_id).collect();
        // Stable sort: ties keep recording order.
        entries.sort_by_key(|payment| payment.timestamp());
        Ok(entries)
    }

    /// Net amount received from a live member (payments minus refunds).
    pub fn total_paid_by(&self, registry: &Registry, member_id: &MemberId) -> ResultEngine<Money> {
        registry.member(member_id)?;
        self.net_paid(member_id)
    }

    /// Net amount received across the whole ledger, including removed members.
    pub fn total_revenue(&self) -> ResultEngine<Money> {
        self.payments
            .iter()
            .try_fold(Money::ZERO, |total, payment| {
                total.checked_sub(payment.balance_effect())
            })
            .ok_or_else(overflow)
    }

    /// Every entry in recording order.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payment(&self, payment_id: &PaymentId) -> ResultEngine<&Payment> {
        self.payments
            .iter()
            .find(|payment| payment.id() == payment_id)
            .ok_or_else(|| EngineError::NotFound(format!("payment {payment_id}")))
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    fn net_paid(&self, member_id: &MemberId) -> ResultEngine<Money> {
        self.entries_for(member_id)
            .try_fold(Money::ZERO, |total, payment| {
                total.checked_sub(payment.balance_effect())
            })
            .ok_or_else(overflow)
    }

    fn entries_for<'a>(&'a self, member_id: &MemberId) -> impl Iterator<Item = &'a Payment> {
        self.payments
            .iter()
            .filter(move |payment| payment.member_id() == member_id)
    }
}

fn overflow() -> EngineError {
    EngineError::InvalidAmount("balance out of range".to_string())
}
