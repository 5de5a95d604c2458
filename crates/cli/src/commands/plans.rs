use gym_engine::{MembershipPlan, NewPlan, PlanUpdate, compute_price};

use crate::{
    cli::{PlanCommand, list_update},
    error::CliError,
};

use super::Store;

pub fn run(command: PlanCommand, store: &Store) -> Result<(), CliError> {
    // Quotes never touch the store.
    if let PlanCommand::Price {
        id: None,
        base_price: Some(base_price),
        strategy,
    } = &command
    {
        let strategy = strategy.strategy()?.unwrap_or_default();
        println!("{}", compute_price(*base_price, &strategy)?);
        return Ok(());
    }

    let mut gym = store.open()?;
    match command {
        PlanCommand::Add {
            name,
            base_price,
            duration_days,
            strategy,
            benefits,
            id,
        } => {
            let plan = gym.registry.create_plan(NewPlan {
                id,
                name,
                base_price,
                duration_days,
                strategy: strategy.strategy()?.unwrap_or_default(),
                benefits,
            })?;
            store.save(&gym)?;
            println!("created plan {}", line(&plan)?);
        }
        PlanCommand::List => {
            for plan in gym.registry.plans() {
                println!("{}", line(plan)?);
            }
        }
        PlanCommand::Show { id } => {
            let plan = gym.registry.plan(&id)?;
            println!("{}", line(plan)?);
            println!("  base price: {}", plan.base_price);
            println!("  pricing: {}", plan.strategy);
            for benefit in &plan.benefits {
                println!("  benefit: {benefit}");
            }
        }
        PlanCommand::Update {
            id,
            name,
            base_price,
            duration_days,
            strategy,
            benefits,
            clear_benefits,
        } => {
            let update = PlanUpdate {
                name,
                base_price,
                duration_days,
                strategy: strategy.strategy()?,
                benefits: list_update(benefits, clear_benefits),
            };
            let plan = gym.registry.update_plan(&id, update)?;
            store.save(&gym)?;
            println!("updated plan {}", line(&plan)?);
        }
        PlanCommand::Remove { id } => {
            let plan = gym.registry.remove_plan(&id)?;
            store.save(&gym)?;
            println!("removed plan {} ({})", plan.name, plan.id);
        }
        PlanCommand::Price { id, .. } => {
            let id = id.ok_or_else(|| {
                CliError::Usage("a plan id or --base-price is required".to_string())
            })?;
            println!("{}", gym.registry.plan_price(&id)?);
        }
    }
    Ok(())
}

fn line(plan: &MembershipPlan) -> Result<String, CliError> {
    Ok(format!(
        "{}  {}: {} for {} days",
        plan.id,
        plan.name,
        plan.effective_price()?,
        plan.duration_days
    ))
}
