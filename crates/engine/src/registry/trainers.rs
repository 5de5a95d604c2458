use std::collections::BTreeSet;

use crate::{
    EngineError, MemberId, NewTrainer, ResultEngine, Trainer, TrainerId, TrainerUpdate,
    util::{email_key, normalize_email, normalize_required_text, normalize_tags},
};

use super::{Registry, fresh_id, not_found, require};

impl Registry {
    /// Adds a trainer. Explicit ids and e-mails must be unused.
    pub fn add_trainer(&mut self, new: NewTrainer) -> ResultEngine<Trainer> {
        let name = normalize_required_text(&new.name, "trainer name")?;
        let email = normalize_email(&new.email)?;
        let specialties = normalize_tags(&new.specialties)?;
        self.ensure_trainer_email_free(&email, None)?;

        let id = match new.id {
            Some(id) => {
                if self.trainer_id_taken(&id) {
                    return Err(EngineError::DuplicateIdentifier(format!("trainer {id}")));
                }
                id
            }
            None => fresh_id(TrainerId::generate, |id| self.trainer_id_taken(id)),
        };

        let trainer = Trainer {
            id: id.clone(),
            name,
            email,
            specialties,
            members: BTreeSet::new(),
        };
        self.trainers.insert(id, trainer.clone());
        Ok(trainer)
    }

    pub fn trainer(&self, trainer_id: &TrainerId) -> ResultEngine<&Trainer> {
        require(&self.trainers, trainer_id, "trainer")
    }

    /// Lists trainers ordered by name, then id.
    pub fn trainers(&self) -> Vec<&Trainer> {
        let mut trainers: Vec<&Trainer> = self.trainers.values().collect();
        trainers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        trainers
    }

    pub fn find_trainer_by_email(&self, email: &str) -> Option<&Trainer> {
        let key = email_key(email);
        self.trainers.values().find(|trainer| email_key(&trainer.email) == key)
    }

    pub fn update_trainer(
        &mut self,
        trainer_id: &TrainerId,
        update: TrainerUpdate,
    ) -> ResultEngine<Trainer> {
        self.trainer(trainer_id)?;

        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_text(name, "trainer name"))
            .transpose()?;
        let email = update.email.as_deref().map(normalize_email).transpose()?;
        if let Some(email) = &email {
            self.ensure_trainer_email_free(email, Some(trainer_id))?;
        }
        let specialties = update.specialties.as_ref().map(normalize_tags).transpose()?;

        let trainer = self
            .trainers
            .get_mut(trainer_id)
            .ok_or_else(|| not_found("trainer", trainer_id))?;
        if let Some(name) = name {
            trainer.name = name;
        }
        if let Some(email) = email {
            trainer.email = email;
        }
        if let Some(specialties) = specialties {
            trainer.specialties = specialties;
        }
        Ok(trainer.clone())
    }

    /// Removes a trainer and retires its id. Assigned members are unaffected.
    pub fn remove_trainer(&mut self, trainer_id: &TrainerId) -> ResultEngine<Trainer> {
        let trainer = self
            .trainers
            .remove(trainer_id)
            .ok_or_else(|| not_found("trainer", trainer_id))?;
        self.retired.trainers.insert(trainer_id.clone());
        Ok(trainer)
    }

    /// Assigns a member to a trainer. Assigning twice is a no-op.
    pub fn assign_trainer(&mut self, trainer_id: &TrainerId, member_id: &MemberId) -> ResultEngine<()> {
        self.member(member_id)?;
        let trainer = self
            .trainers
            .get_mut(trainer_id)
            .ok_or_else(|| not_found("trainer", trainer_id))?;
        trainer.members.insert(member_id.clone());
        Ok(())
    }

    /// Drops a member from a trainer. Returns `false` if it was not assigned.
    pub fn unassign_trainer(
        &mut self,
        trainer_id: &TrainerId,
        member_id: &MemberId,
    ) -> ResultEngine<bool> {
        let trainer = self
            .trainers
            .get_mut(trainer_id)
            .ok_or_else(|| not_found("trainer", trainer_id))?;
        Ok(trainer.members.remove(member_id))
    }

    /// Trainers the member is assigned to, ordered by name.
    pub fn trainers_for_member(&self, member_id: &MemberId) -> ResultEngine<Vec<&Trainer>> {
        self.member(member_id)?;
        Ok(self
            .trainers()
            .into_iter()
            .filter(|trainer| trainer.is_assigned(member_id))
            .collect())
    }

    fn trainer_id_taken(&self, trainer_id: &TrainerId) -> bool {
        self.trainers.contains_key(trainer_id) || self.retired.trainers.contains(trainer_id)
    }

    fn ensure_trainer_email_free(
        &self,
        email: &str,
        except: Option<&TrainerId>,
    ) -> ResultEngine<()> {
        match self.find_trainer_by_email(email) {
            Some(existing) if Some(&existing.id) != except => Err(
                EngineError::DuplicateIdentifier(format!("trainer email {email}")),
            ),
            _ => Ok(()),
        }
    }
}
