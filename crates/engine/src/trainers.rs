//! The module contains the `Trainer` type.

use std::collections::BTreeSet;

use crate::{MemberId, TrainerId};

/// A trainer working at the gym.
///
/// `members` holds weak references: a trainer never owns the members assigned
/// to it, and removing a member drops it from every trainer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    pub email: String,
    /// Title-cased specialty tags, e.g. `"Strength Training"`.
    pub specialties: Vec<String>,
    pub members: BTreeSet<MemberId>,
}

impl Trainer {
    pub fn is_assigned(&self, member_id: &MemberId) -> bool {
        self.members.contains(member_id)
    }
}
