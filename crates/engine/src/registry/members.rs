use crate::{
    EngineError, Member, MemberId, MemberUpdate, Membership, NewMember, ResultEngine,
    util::{email_key, normalize_email, normalize_required_text},
};

use super::{Registry, fresh_id, not_found, require};

impl Registry {
    /// Registers a new member.
    ///
    /// A fresh id is generated unless `new.id` is set; an explicit id that is
    /// live or retired fails with [`EngineError::DuplicateIdentifier`]. E-mails
    /// are unique across members, ignoring case.
    pub fn register_member(&mut self, new: NewMember) -> ResultEngine<Member> {
        let name = normalize_required_text(&new.name, "member name")?;
        let email = normalize_email(&new.email)?;
        self.ensure_member_email_free(&email, None)?;

        let id = match new.id {
            Some(id) => {
                if self.member_id_taken(&id) {
                    return Err(EngineError::DuplicateIdentifier(format!("member {id}")));
                }
                id
            }
            None => fresh_id(MemberId::generate, |id| self.member_id_taken(id)),
        };

        let member = Member {
            id: id.clone(),
            name,
            email,
            join_date: new.join_date,
        };
        self.members.insert(id, member.clone());
        Ok(member)
    }

    /// Returns the member with the given id.
    pub fn member(&self, member_id: &MemberId) -> ResultEngine<&Member> {
        require(&self.members, member_id, "member")
    }

    /// Lists members ordered by join date, then id.
    pub fn members(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.members.values().collect();
        members.sort_by(|a, b| a.join_date.cmp(&b.join_date).then_with(|| a.id.cmp(&b.id)));
        members
    }

    pub fn find_member_by_email(&self, email: &str) -> Option<&Member> {
        let key = email_key(email);
        self.members.values().find(|member| email_key(&member.email) == key)
    }

    /// Applies profile changes to a member.
    pub fn update_member(&mut self, member_id: &MemberId, update: MemberUpdate) -> ResultEngine<Member> {
        self.member(member_id)?;

        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_text(name, "member name"))
            .transpose()?;
        let email = update.email.as_deref().map(normalize_email).transpose()?;
        if let Some(email) = &email {
            self.ensure_member_email_free(email, Some(member_id))?;
        }

        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| not_found("member", member_id))?;
        if let Some(name) = name {
            member.name = name;
        }
        if let Some(email) = email {
            member.email = email;
        }
        Ok(member.clone())
    }

    /// Removes a member.
    ///
    /// Fails with [`EngineError::HasActiveMembership`] while the member holds
    /// an active membership. On success the member's (inactive) memberships
    /// go with it, the member leaves every trainer, and all the removed ids are
    /// retired. Ledger entries are kept: they keep pointing at the retired ids.
    pub fn remove_member(&mut self, member_id: &MemberId) -> ResultEngine<Member> {
        self.member(member_id)?;
        if self.active.contains_key(member_id) {
            return Err(EngineError::HasActiveMembership(member_id.to_string()));
        }

        let membership_ids: Vec<_> = self
            .memberships
            .values()
            .filter(|membership| &membership.member_id == member_id)
            .map(|membership| membership.id.clone())
            .collect();
        for membership_id in membership_ids {
            self.memberships.remove(&membership_id);
            self.retired
                .memberships
                .insert(membership_id, member_id.clone());
        }

        for trainer in self.trainers.values_mut() {
            trainer.members.remove(member_id);
        }

        let member = self
            .members
            .remove(member_id)
            .ok_or_else(|| not_found("member", member_id))?;
        self.retired.members.insert(member_id.clone());
        Ok(member)
    }

    /// The member's active membership, if any.
    pub fn active_membership(&self, member_id: &MemberId) -> ResultEngine<Option<&Membership>> {
        self.member(member_id)?;
        Ok(self
            .active
            .get(member_id)
            .and_then(|membership_id| self.memberships.get(membership_id)))
    }

    /// `true` if the id belongs to a member that was removed.
    pub fn is_retired_member(&self, member_id: &MemberId) -> bool {
        self.retired.members.contains(member_id)
    }

    fn member_id_taken(&self, member_id: &MemberId) -> bool {
        self.members.contains_key(member_id) || self.retired.members.contains(member_id)
    }

    fn ensure_member_email_free(&self, email: &str, except: Option<&MemberId>) -> ResultEngine<()> {
        match self.find_member_by_email(email) {
            Some(existing) if Some(&existing.id) != except => Err(
                EngineError::DuplicateIdentifier(format!("member email {email}")),
            ),
            _ => Ok(()),
        }
    }
}
