use chrono::NaiveDate;

use crate::{
    EngineError, MemberId, Membership, MembershipId, MembershipStatus, Money, PlanId,
    ResultEngine,
};

use super::{Registry, fresh_id, not_found, require};

impl Registry {
    /// Subscribes a member to a plan starting on `start_date`.
    ///
    /// Fails with [`EngineError::ConflictingActiveMembership`] if the member
    /// already has an active membership: it must be cancelled or expire first.
    pub fn assign_membership(
        &mut self,
        member_id: &MemberId,
        plan_id: &PlanId,
        start_date: NaiveDate,
    ) -> ResultEngine<Membership> {
        self.member(member_id)?;
        let plan = self.plan(plan_id)?;
        // Reject starts whose end date cannot be represented.
        plan.end_date(start_date)?;
        if self.active.contains_key(member_id) {
            return Err(EngineError::ConflictingActiveMembership(member_id.to_string()));
        }

        let id = fresh_id(MembershipId::generate, |id| self.membership_id_taken(id));
        let membership = Membership {
            id: id.clone(),
            member_id: member_id.clone(),
            plan_id: plan_id.clone(),
            start_date,
            status: MembershipStatus::Active,
        };
        self.active.insert(member_id.clone(), id.clone());
        self.memberships.insert(id, membership.clone());
        Ok(membership)
    }

    /// Cancels a membership. Cancelling twice is a no-op.
    pub fn cancel_membership(&mut self, membership_id: &MembershipId) -> ResultEngine<Membership> {
        let membership = self
            .memberships
            .get_mut(membership_id)
            .ok_or_else(|| not_found("membership", membership_id))?;
        if membership.status == MembershipStatus::Active {
            self.active.remove(&membership.member_id);
        }
        membership.status = MembershipStatus::Cancelled;
        Ok(membership.clone())
    }

    /// Expires every active membership whose end date is before `as_of`.
    ///
    /// Returns the ids that changed status, in id order. The due set is
    /// computed before anything is modified.
    pub fn expire_due_memberships(&mut self, as_of: NaiveDate) -> ResultEngine<Vec<MembershipId>> {
        let mut due = Vec::new();
        for membership_id in self.active.values() {
            let membership = require(&self.memberships, membership_id, "membership")?;
            let end_date = self.plan(&membership.plan_id)?.end_date(membership.start_date)?;
            if end_date < as_of {
                due.push(membership_id.clone());
            }
        }
        due.sort();

        for membership_id in &due {
            if let Some(membership) = self.memberships.get_mut(membership_id) {
                membership.status = MembershipStatus::Expired;
                self.active.remove(&membership.member_id);
            }
        }
        Ok(due)
    }

    pub fn membership(&self, membership_id: &MembershipId) -> ResultEngine<&Membership> {
        require(&self.memberships, membership_id, "membership")
    }

    /// Lists memberships ordered by start date, then id.
    pub fn memberships(&self) -> Vec<&Membership> {
        let mut memberships: Vec<&Membership> = self.memberships.values().collect();
        sort_memberships(&mut memberships);
        memberships
    }

    /// Every membership ever assigned to the member, oldest first.
    pub fn memberships_for_member(&self, member_id: &MemberId) -> ResultEngine<Vec<&Membership>> {
        self.member(member_id)?;
        let mut memberships: Vec<&Membership> = self
            .memberships
            .values()
            .filter(|membership| &membership.member_id == member_id)
            .collect();
        sort_memberships(&mut memberships);
        Ok(memberships)
    }

    /// Effective price of the membership, derived from its plan.
    pub fn membership_price(&self, membership_id: &MembershipId) -> ResultEngine<Money> {
        let membership = self.membership(membership_id)?;
        self.plan_price(&membership.plan_id)
    }

    /// Date the membership runs until.
    pub fn membership_end_date(&self, membership_id: &MembershipId) -> ResultEngine<NaiveDate> {
        let membership = self.membership(membership_id)?;
        self.plan(&membership.plan_id)?.end_date(membership.start_date)
    }

    /// `true` if the id belongs to a membership removed with its member.
    pub fn is_retired_membership(&self, membership_id: &MembershipId) -> bool {
        self.retired.memberships.contains_key(membership_id)
    }

    /// The member a retired membership belonged to.
    pub fn retired_membership_owner(&self, membership_id: &MembershipId) -> Option<&MemberId> {
        self.retired.memberships.get(membership_id)
    }

    /// Inserts a membership as read from a document.
    ///
    /// Checks the same invariants as [`Registry::assign_membership`] plus id
    /// uniqueness, but keeps the stored id and status.
    pub(crate) fn restore_membership(&mut self, membership: Membership) -> ResultEngine<()> {
        if self.membership_id_taken(&membership.id) {
            return Err(EngineError::DuplicateIdentifier(format!(
                "membership {}",
                membership.id
            )));
        }
        self.member(&membership.member_id)?;
        self.plan(&membership.plan_id)?.end_date(membership.start_date)?;
        if membership.is_active() {
            if self.active.contains_key(&membership.member_id) {
                return Err(EngineError::ConflictingActiveMembership(
                    membership.member_id.to_string(),
                ));
            }
            self.active
                .insert(membership.member_id.clone(), membership.id.clone());
        }
        self.memberships.insert(membership.id.clone(), membership);
        Ok(())
    }

    fn membership_id_taken(&self, membership_id: &MembershipId) -> bool {
        self.memberships.contains_key(membership_id)
            || self.retired.memberships.contains_key(membership_id)
    }
}

fn sort_memberships(memberships: &mut [&Membership]) {
    memberships.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.id.cmp(&b.id))
    });
}
