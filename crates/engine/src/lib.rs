//! Core of the gym management system.
//!
//! A [`Gym`] bundles the [`Registry`] (members, trainers, plans and
//! memberships) with the payment [`Ledger`]. Prices are derived from plans
//! through a [`PricingStrategy`], balances are derived from the ledger, and
//! the whole state persists as a single JSON document (see [`document`] and
//! [`storage`]).

pub use commands::{MemberUpdate, NewMember, NewPlan, NewTrainer, PlanUpdate, TrainerUpdate};
pub use error::EngineError;
pub use gym::{Gym, GymBuilder, GymSummary};
pub use ids::{MemberId, MembershipId, PaymentId, PlanId, TrainerId};
pub use ledger::Ledger;
pub use members::Member;
pub use memberships::{Membership, MembershipStatus};
pub use money::Money;
pub use payments::{Payment, PaymentKind, PaymentMethod};
pub use plans::MembershipPlan;
pub use pricing::{Percent, PricingStrategy, compute_price};
pub use registry::{Registry, RetiredIds};
pub use trainers::Trainer;

mod commands;
pub mod document;
mod error;
mod gym;
mod ids;
mod ledger;
mod members;
mod memberships;
mod money;
mod payments;
mod plans;
mod pricing;
mod registry;
pub mod storage;
mod trainers;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
