//! The persisted document.
//!
//! A [`Gym`] is saved as one pretty-printed JSON document with a flat
//! collection per entity type. Cross-references are always stored as ids,
//! never as nested copies:
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "name": "Iron Temple",
//!   "trainers": [{ "id": "trn_1", "members": ["mem_1"], ... }],
//!   "plans": [{ "id": "plan_1", "base_price": "100.00",
//!               "strategy": { "type": "percent_off", "percent": "20" }, ... }],
//!   "members": [{ "id": "mem_1", ... }],
//!   "memberships": [{ "id": "ms_1", "member_id": "mem_1", "plan_id": "plan_1", ... }],
//!   "payments": [{ "id": "pay_1", "member_id": "mem_1", "membership_id": "ms_1",
//!                  "amount": "80.00", ... }],
//!   "retired": { "members": [], "memberships": {}, "trainers": [], "plans": [] }
//! }
//! ```
//!
//! Loading rebuilds the state in dependency order (plans and trainers, then
//! members and trainer assignments, then memberships, then payments) through
//! the same registry and ledger checks used at runtime. The first failure
//! aborts the load with [`EngineError::CorruptDocument`]; nothing built so far
//! escapes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Gym, Ledger, Member, MemberId, Membership, MembershipId, MembershipPlan,
    MembershipStatus, Money, NewMember, NewPlan, NewTrainer, Payment, PaymentId, PaymentKind,
    PaymentMethod, PlanId, PricingStrategy, Registry, ResultEngine, RetiredIds, Trainer,
    TrainerId,
};

/// Version written by [`save`] and the only version [`load`] accepts.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    schema_version: u32,
    name: String,
    trainers: Vec<TrainerRecord>,
    plans: Vec<PlanRecord>,
    members: Vec<MemberRecord>,
    memberships: Vec<MembershipRecord>,
    payments: Vec<PaymentRecord>,
    #[serde(default)]
    retired: RetiredRecord,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrainerRecord {
    id: TrainerId,
    name: String,
    email: String,
    #[serde(default)]
    specialties: Vec<String>,
    #[serde(default)]
    members: Vec<MemberId>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanRecord {
    id: PlanId,
    name: String,
    base_price: Money,
    duration_days: u32,
    strategy: PricingStrategy,
    #[serde(default)]
    benefits: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberRecord {
    id: MemberId,
    name: String,
    email: String,
    join_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MembershipRecord {
    id: MembershipId,
    member_id: MemberId,
    plan_id: PlanId,
    start_date: NaiveDate,
    status: MembershipStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaymentRecord {
    id: PaymentId,
    member_id: MemberId,
    membership_id: MembershipId,
    amount: Money,
    kind: PaymentKind,
    method: PaymentMethod,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RetiredRecord {
    #[serde(default)]
    members: BTreeSet<MemberId>,
    /// Retired membership id to the member it belonged to.
    #[serde(default)]
    memberships: BTreeMap<MembershipId, MemberId>,
    #[serde(default)]
    trainers: BTreeSet<TrainerId>,
    #[serde(default)]
    plans: BTreeSet<PlanId>,
}

impl From<&Trainer> for TrainerRecord {
    fn from(trainer: &Trainer) -> Self {
        Self {
            id: trainer.id.clone(),
            name: trainer.name.clone(),
            email: trainer.email.clone(),
            specialties: trainer.specialties.clone(),
            members: trainer.members.iter().cloned().collect(),
        }
    }
}

impl From<&MembershipPlan> for PlanRecord {
    fn from(plan: &MembershipPlan) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            base_price: plan.base_price,
            duration_days: plan.duration_days,
            strategy: plan.strategy,
            benefits: plan.benefits.clone(),
        }
    }
}

impl From<&Member> for MemberRecord {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            join_date: member.join_date,
        }
    }
}

impl From<&Membership> for MembershipRecord {
    fn from(membership: &Membership) -> Self {
        Self {
            id: membership.id.clone(),
            member_id: membership.member_id.clone(),
            plan_id: membership.plan_id.clone(),
            start_date: membership.start_date,
            status: membership.status,
        }
    }
}

impl From<&Payment> for PaymentRecord {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id().clone(),
            member_id: payment.member_id().clone(),
            membership_id: payment.membership_id().clone(),
            amount: payment.amount(),
            kind: payment.kind(),
            method: payment.method(),
            timestamp: payment.timestamp(),
        }
    }
}

impl TryFrom<PaymentRecord> for Payment {
    type Error = EngineError;

    fn try_from(record: PaymentRecord) -> Result<Self, Self::Error> {
        Payment::new(
            record.id,
            record.member_id,
            record.membership_id,
            record.amount,
            record.kind,
            record.method,
            record.timestamp,
        )
    }
}

impl From<RetiredRecord> for RetiredIds {
    fn from(record: RetiredRecord) -> Self {
        Self {
            members: record.members,
            memberships: record.memberships,
            trainers: record.trainers,
            plans: record.plans,
        }
    }
}

impl From<&RetiredIds> for RetiredRecord {
    fn from(retired: &RetiredIds) -> Self {
        Self {
            members: retired.members.clone(),
            memberships: retired.memberships.clone(),
            trainers: retired.trainers.clone(),
            plans: retired.plans.clone(),
        }
    }
}

impl Document {
    fn from_gym(gym: &Gym) -> Self {
        let registry = &gym.registry;

        let mut trainers: Vec<TrainerRecord> =
            registry.trainers().into_iter().map(TrainerRecord::from).collect();
        trainers.sort_by(|a, b| a.id.cmp(&b.id));
        let mut plans: Vec<PlanRecord> = registry.plans().into_iter().map(PlanRecord::from).collect();
        plans.sort_by(|a, b| a.id.cmp(&b.id));
        let mut members: Vec<MemberRecord> =
            registry.members().into_iter().map(MemberRecord::from).collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        let mut memberships: Vec<MembershipRecord> = registry
            .memberships()
            .into_iter()
            .map(MembershipRecord::from)
            .collect();
        memberships.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            schema_version: SCHEMA_VERSION,
            name: gym.name().to_string(),
            trainers,
            plans,
            members,
            memberships,
            // Recording order is part of the ledger (statement tie-breaks).
            payments: gym.ledger.payments().iter().map(PaymentRecord::from).collect(),
            retired: RetiredRecord::from(registry.retired()),
        }
    }

    fn into_gym(self) -> ResultEngine<Gym> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(EngineError::CorruptDocument(format!(
                "unsupported schema version {}, expected {SCHEMA_VERSION}",
                self.schema_version
            )));
        }

        if let Some((membership_id, member_id)) = self
            .retired
            .memberships
            .iter()
            .find(|(_, member_id)| !self.retired.members.contains(*member_id))
        {
            return Err(EngineError::CorruptDocument(format!(
                "retired membership {membership_id} belongs to member {member_id}, \
                 which is not retired"
            )));
        }
        let mut registry = Registry::with_retired(self.retired.into());

        for record in self.plans {
            let mut plan = NewPlan::new(record.name, record.base_price, record.duration_days)
                .id(record.id)
                .strategy(record.strategy);
            plan.benefits = record.benefits;
            registry.create_plan(plan)?;
        }

        let mut assignments = Vec::new();
        for record in self.trainers {
            let mut trainer = NewTrainer::new(record.name, record.email).id(record.id.clone());
            trainer.specialties = record.specialties;
            registry.add_trainer(trainer)?;
            assignments.push((record.id, record.members));
        }

        for record in self.members {
            registry.register_member(
                NewMember::new(record.name, record.email, record.join_date).id(record.id),
            )?;
        }

        for (trainer_id, members) in assignments {
            for member_id in members {
                registry.assign_trainer(&trainer_id, &member_id)?;
            }
        }

        for record in self.memberships {
            registry.restore_membership(Membership {
                id: record.id,
                member_id: record.member_id,
                plan_id: record.plan_id,
                start_date: record.start_date,
                status: record.status,
            })?;
        }

        let mut ledger = Ledger::new();
        for record in self.payments {
            ledger.restore(&registry, Payment::try_from(record)?)?;
        }

        Gym::builder()
            .name(self.name)
            .registry(registry)
            .ledger(ledger)
            .build()
    }
}

/// Serializes the whole gym into a document.
pub fn save(gym: &Gym) -> ResultEngine<String> {
    serde_json::to_string_pretty(&Document::from_gym(gym))
        .map_err(|err| EngineError::CorruptDocument(format!("failed to encode document: {err}")))
}

/// Rebuilds a gym from a document produced by [`save`].
///
/// Every failure is reported as [`EngineError::CorruptDocument`].
pub fn load(document: &str) -> ResultEngine<Gym> {
    let document: Document = serde_json::from_str(document)
        .map_err(|err| EngineError::CorruptDocument(err.to_string()))?;
    document.into_gym().map_err(|err| match err {
        EngineError::CorruptDocument(_) => err,
        other => EngineError::CorruptDocument(other.to_string()),
    })
}
