//! The module contains the `MembershipPlan` type.

use chrono::{Days, NaiveDate};

use crate::{EngineError, Money, PlanId, PricingStrategy, ResultEngine};

/// A membership plan members can subscribe to.
///
/// The effective price is never stored: it is derived from `base_price` and
/// `strategy` every time it is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipPlan {
    pub id: PlanId,
    pub name: String,
    pub base_price: Money,
    /// Length of a membership on this plan, in days (always > 0).
    pub duration_days: u32,
    pub strategy: PricingStrategy,
    pub benefits: Vec<String>,
}

impl MembershipPlan {
    /// Price charged for one membership on this plan.
    pub fn effective_price(&self) -> ResultEngine<Money> {
        self.strategy.apply(self.base_price)
    }

    /// Date a membership starting on `start_date` runs until.
    ///
    /// A membership is due for expiry once `as_of > end_date`.
    pub fn end_date(&self, start_date: NaiveDate) -> ResultEngine<NaiveDate> {
        start_date
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .ok_or_else(|| {
                EngineError::Validation(format!(
                    "membership starting {start_date} on plan {} ends out of calendar range",
                    self.id
                ))
            })
    }
}

pub(crate) fn validate_duration(duration_days: u32) -> ResultEngine<u32> {
    if duration_days == 0 {
        return Err(EngineError::Validation(
            "plan duration must be at least one day".to_string(),
        ));
    }
    Ok(duration_days)
}
