//! The `Gym` holds the whole state of one store: the registry and the ledger.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
    Ledger, MemberId, MembershipId, Money, Payment, PaymentMethod, Registry, ResultEngine,
    util::normalize_required_text,
};

/// One gym's registry and ledger, saved and loaded as a unit.
///
/// The ledger operations that need the registry to resolve references are
/// mirrored here so callers don't have to split the borrow themselves.
#[derive(Clone, Debug)]
pub struct Gym {
    name: String,
    pub registry: Registry,
    pub ledger: Ledger,
}

impl Gym {
    /// Return a builder for `Gym`. Help to build the struct.
    pub fn builder() -> GymBuilder {
        GymBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: &str) -> ResultEngine<()> {
        self.name = normalize_required_text(name, "gym name")?;
        Ok(())
    }

    pub fn record_payment(
        &mut self,
        member_id: &MemberId,
        membership_id: &MembershipId,
        amount: Money,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Payment> {
        self.ledger
            .record_payment(&self.registry, member_id, membership_id, amount, method, timestamp)
    }

    pub fn record_refund(
        &mut self,
        member_id: &MemberId,
        membership_id: &MembershipId,
        amount: Money,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Payment> {
        self.ledger
            .record_refund(&self.registry, member_id, membership_id, amount, method, timestamp)
    }

    pub fn balance_for(&self, member_id: &MemberId) -> ResultEngine<Money> {
        self.ledger.balance_for(&self.registry, member_id)
    }

    pub fn statement_for(&self, member_id: &MemberId) -> ResultEngine<Vec<&Payment>> {
        self.ledger.statement_for(&self.registry, member_id)
    }

    /// Headline numbers for the whole gym.
    pub fn summary(&self) -> ResultEngine<GymSummary> {
        let members = self.registry.member_count();
        let active_members = self.registry.active_member_count();
        Ok(GymSummary {
            name: self.name.clone(),
            members,
            active_members,
            inactive_members: members - active_members,
            trainers: self.registry.trainer_count(),
            plans: self.registry.plan_count(),
            payments: self.ledger.len(),
            revenue: self.ledger.total_revenue()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GymSummary {
    pub name: String,
    pub members: usize,
    pub active_members: usize,
    pub inactive_members: usize,
    pub trainers: usize,
    pub plans: usize,
    pub payments: usize,
    pub revenue: Money,
}

impl fmt::Display for GymSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gym: {}", self.name)?;
        writeln!(
            f,
            "Members: {} ({} active, {} inactive)",
            self.members, self.active_members, self.inactive_members
        )?;
        writeln!(f, "Trainers: {}", self.trainers)?;
        writeln!(f, "Plans: {}", self.plans)?;
        write!(f, "Revenue: {} over {} ledger entries", self.revenue, self.payments)
    }
}

/// The builder for `Gym`
#[derive(Default)]
pub struct GymBuilder {
    name: String,
    registry: Registry,
    ledger: Ledger,
}

impl GymBuilder {
    /// Pass the gym's display name (required).
    pub fn name(mut self, name: impl Into<String>) -> GymBuilder {
        self.name = name.into();
        self
    }

    /// Start from an existing registry instead of an empty one.
    pub fn registry(mut self, registry: Registry) -> GymBuilder {
        self.registry = registry;
        self
    }

    /// Start from an existing ledger instead of an empty one.
    pub fn ledger(mut self, ledger: Ledger) -> GymBuilder {
        self.ledger = ledger;
        self
    }

    /// Construct `Gym`
    pub fn build(self) -> ResultEngine<Gym> {
        Ok(Gym {
            name: normalize_required_text(&self.name, "gym name")?,
            registry: self.registry,
            ledger: self.ledger,
        })
    }
}
