use crate::{
    EngineError, MembershipPlan, Money, NewPlan, PlanId, PlanUpdate, ResultEngine,
    plans::validate_duration,
    util::{normalize_required_text, normalize_text_list},
};

use super::{Registry, fresh_id, not_found, require};

impl Registry {
    /// Creates a membership plan.
    ///
    /// Rejects negative base prices, zero durations and invalid strategies.
    pub fn create_plan(&mut self, new: NewPlan) -> ResultEngine<MembershipPlan> {
        let name = normalize_required_text(&new.name, "plan name")?;
        let base_price = new.base_price.ensure_non_negative("base price")?;
        let duration_days = validate_duration(new.duration_days)?;
        new.strategy.validate()?;

        let id = match new.id {
            Some(id) => {
                if self.plan_id_taken(&id) {
                    return Err(EngineError::DuplicateIdentifier(format!("plan {id}")));
                }
                id
            }
            None => fresh_id(PlanId::generate, |id| self.plan_id_taken(id)),
        };

        let plan = MembershipPlan {
            id: id.clone(),
            name,
            base_price,
            duration_days,
            strategy: new.strategy,
            benefits: normalize_text_list(&new.benefits),
        };
        self.plans.insert(id, plan.clone());
        Ok(plan)
    }

    pub fn plan(&self, plan_id: &PlanId) -> ResultEngine<&MembershipPlan> {
        require(&self.plans, plan_id, "plan")
    }

    /// Lists plans ordered by name, then id.
    pub fn plans(&self) -> Vec<&MembershipPlan> {
        let mut plans: Vec<&MembershipPlan> = self.plans.values().collect();
        plans.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        plans
    }

    pub fn update_plan(&mut self, plan_id: &PlanId, update: PlanUpdate) -> ResultEngine<MembershipPlan> {
        let current = self.plan(plan_id)?;

        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_text(name, "plan name"))
            .transpose()?;
        let base_price = update
            .base_price
            .map(|price| price.ensure_non_negative("base price"))
            .transpose()?;
        let duration_days = update.duration_days.map(validate_duration).transpose()?;
        if let Some(strategy) = &update.strategy {
            strategy.validate()?;
        }
        // The new combination must still price.
        update
            .strategy
            .unwrap_or(current.strategy)
            .apply(base_price.unwrap_or(current.base_price))?;

        let plan = self
            .plans
            .get_mut(plan_id)
            .ok_or_else(|| not_found("plan", plan_id))?;
        if let Some(name) = name {
            plan.name = name;
        }
        if let Some(base_price) = base_price {
            plan.base_price = base_price;
        }
        if let Some(duration_days) = duration_days {
            plan.duration_days = duration_days;
        }
        if let Some(strategy) = update.strategy {
            plan.strategy = strategy;
        }
        if let Some(benefits) = update.benefits {
            plan.benefits = normalize_text_list(&benefits);
        }
        Ok(plan.clone())
    }

    /// Removes a plan no membership refers to, retiring its id.
    pub fn remove_plan(&mut self, plan_id: &PlanId) -> ResultEngine<MembershipPlan> {
        self.plan(plan_id)?;
        if self
            .memberships
            .values()
            .any(|membership| &membership.plan_id == plan_id)
        {
            return Err(EngineError::PlanInUse(plan_id.to_string()));
        }
        let plan = self
            .plans
            .remove(plan_id)
            .ok_or_else(|| not_found("plan", plan_id))?;
        self.retired.plans.insert(plan_id.clone());
        Ok(plan)
    }

    /// Effective price of one membership on the plan.
    pub fn plan_price(&self, plan_id: &PlanId) -> ResultEngine<Money> {
        self.plan(plan_id)?.effective_price()
    }

    fn plan_id_taken(&self, plan_id: &PlanId) -> bool {
        self.plans.contains_key(plan_id) || self.retired.plans.contains(plan_id)
    }
}
