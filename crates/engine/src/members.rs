//! The module contains the `Member` type.

use chrono::NaiveDate;

use crate::MemberId;

/// A registered gym member.
///
/// Members are owned by the [`Registry`](crate::Registry) and only mutated
/// through it. The member's active membership is tracked by the registry, see
/// [`Registry::active_membership`](crate::Registry::active_membership).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Contact e-mail, unique across members (case-insensitive).
    pub email: String,
    pub join_date: NaiveDate,
}
