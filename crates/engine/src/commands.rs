//! Command structs for registry operations.
//!
//! These types group parameters for create/update operations, keeping call
//! sites readable and avoiding long argument lists. Optional fields default
//! to "generate" (ids) or "leave unchanged" (updates).

use chrono::NaiveDate;

use crate::{MemberId, Money, PlanId, PricingStrategy, TrainerId};

/// Register a new member.
#[derive(Clone, Debug)]
pub struct NewMember {
    pub id: Option<MemberId>,
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
}

impl NewMember {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, join_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            join_date,
        }
    }

    /// Use an explicit id instead of a generated one.
    #[must_use]
    pub fn id(mut self, id: MemberId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Profile changes for an existing member.
#[derive(Clone, Debug, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl MemberUpdate {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Add a new trainer.
#[derive(Clone, Debug)]
pub struct NewTrainer {
    pub id: Option<TrainerId>,
    pub name: String,
    pub email: String,
    pub specialties: Vec<String>,
}

impl NewTrainer {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            specialties: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(mut self, id: TrainerId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialties.push(specialty.into());
        self
    }
}

/// Changes for an existing trainer. `specialties` replaces the whole list.
#[derive(Clone, Debug, Default)]
pub struct TrainerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub specialties: Option<Vec<String>>,
}

impl TrainerUpdate {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn specialties(mut self, specialties: Vec<String>) -> Self {
        self.specialties = Some(specialties);
        self
    }
}

/// Create a membership plan.
#[derive(Clone, Debug)]
pub struct NewPlan {
    pub id: Option<PlanId>,
    pub name: String,
    pub base_price: Money,
    pub duration_days: u32,
    pub strategy: PricingStrategy,
    pub benefits: Vec<String>,
}

impl NewPlan {
    #[must_use]
    pub fn new(name: impl Into<String>, base_price: Money, duration_days: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            base_price,
            duration_days,
            strategy: PricingStrategy::NoDiscount,
            benefits: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(mut self, id: PlanId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn benefit(mut self, benefit: impl Into<String>) -> Self {
        self.benefits.push(benefit.into());
        self
    }
}

/// Changes for an existing plan.
///
/// Effective prices are derived, so changing `base_price` or `strategy`
/// changes the expected price of every membership on the plan.
#[derive(Clone, Debug, Default)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub base_price: Option<Money>,
    pub duration_days: Option<u32>,
    pub strategy: Option<PricingStrategy>,
    pub benefits: Option<Vec<String>>,
}

impl PlanUpdate {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn base_price(mut self, base_price: Money) -> Self {
        self.base_price = Some(base_price);
        self
    }

    #[must_use]
    pub fn duration_days(mut self, duration_days: u32) -> Self {
        self.duration_days = Some(duration_days);
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn benefits(mut self, benefits: Vec<String>) -> Self {
        self.benefits = Some(benefits);
        self
    }
}
