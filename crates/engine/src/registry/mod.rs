//! The entity registry.
//!
//! [`Registry`] exclusively owns members, trainers, plans and memberships.
//! Every mutation validates first and only then touches the maps, so a failed
//! call leaves the registry exactly as it was.
//!
//! Operations are split by entity type across the submodules, each adding an
//! `impl Registry` block.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    EngineError, Member, MemberId, Membership, MembershipId, MembershipPlan, PlanId, ResultEngine,
    Trainer, TrainerId,
};

mod members;
mod memberships;
mod plans;
mod trainers;

/// Identifiers of removed entities.
///
/// Retired ids stay reserved for the lifetime of the store so they are never
/// handed out again, and so ledger entries pointing at a removed member keep
/// resolving to "removed" rather than to a new, unrelated entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetiredIds {
    pub members: BTreeSet<MemberId>,
    /// Each retired membership with the member it belonged to.
    pub memberships: BTreeMap<MembershipId, MemberId>,
    pub trainers: BTreeSet<TrainerId>,
    pub plans: BTreeSet<PlanId>,
}

/// Owner of every non-payment entity, indexed by identifier.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    members: HashMap<MemberId, Member>,
    trainers: HashMap<TrainerId, Trainer>,
    plans: HashMap<PlanId, MembershipPlan>,
    memberships: HashMap<MembershipId, Membership>,
    /// The member -> active membership reference. Holds at most one entry per
    /// member, which is what enforces the single-active-membership rule.
    active: HashMap<MemberId, MembershipId>,
    retired: RetiredIds,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids retired by removals.
    pub fn retired(&self) -> &RetiredIds {
        &self.retired
    }

    /// Builds an empty registry that already reserves `retired`.
    pub(crate) fn with_retired(retired: RetiredIds) -> Self {
        Self {
            retired,
            ..Self::default()
        }
    }

    pub(crate) fn member_count(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn active_member_count(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn trainer_count(&self) -> usize {
        self.trainers.len()
    }

    pub(crate) fn plan_count(&self) -> usize {
        self.plans.len()
    }
}

/// Draws generated ids until one is neither live nor retired.
fn fresh_id<T>(generate: fn() -> T, taken: impl Fn(&T) -> bool) -> T {
    loop {
        let id = generate();
        if !taken(&id) {
            return id;
        }
    }
}

fn not_found(label: &str, id: impl std::fmt::Display) -> EngineError {
    EngineError::NotFound(format!("{label} {id}"))
}

fn require<'a, K, V>(
    map: &'a HashMap<K, V>,
    id: &K,
    label: &str,
) -> ResultEngine<&'a V>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    map.get(id).ok_or_else(|| not_found(label, id))
}
