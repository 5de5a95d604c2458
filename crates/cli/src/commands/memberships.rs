use gym_engine::{Gym, Membership};

use crate::{cli::MembershipCommand, error::CliError};

use super::{Store, today};

pub fn run(command: MembershipCommand, store: &Store) -> Result<(), CliError> {
    let mut gym = store.open()?;
    match command {
        MembershipCommand::Assign {
            member,
            plan,
            start,
        } => {
            let membership =
                gym.registry
                    .assign_membership(&member, &plan, start.unwrap_or_else(today))?;
            store.save(&gym)?;
            println!("assigned {}", line(&gym, &membership)?);
        }
        MembershipCommand::Cancel { id } => {
            let membership = gym.registry.cancel_membership(&id)?;
            store.save(&gym)?;
            println!("cancelled {}", line(&gym, &membership)?);
        }
        MembershipCommand::Expire { as_of } => {
            let as_of = as_of.unwrap_or_else(today);
            let expired = gym.registry.expire_due_memberships(as_of)?;
            tracing::debug!(count = expired.len(), %as_of, "expired memberships");
            if !expired.is_empty() {
                store.save(&gym)?;
            }
            for id in &expired {
                println!("expired {id}");
            }
            println!("{} membership(s) expired as of {as_of}", expired.len());
        }
        MembershipCommand::List { member, status } => {
            let memberships = match &member {
                Some(member) => gym.registry.memberships_for_member(member)?,
                None => gym.registry.memberships(),
            };
            let wanted = |membership: &&Membership| status.is_none_or(|s| membership.status == s);
            for membership in memberships.into_iter().filter(wanted) {
                println!("{}", line(&gym, membership)?);
            }
        }
        MembershipCommand::Show { id } => {
            let membership = gym.registry.membership(&id)?;
            println!("{}", line(&gym, membership)?);
            println!("  price: {}", gym.registry.membership_price(&id)?);
        }
    }
    Ok(())
}

fn line(gym: &Gym, membership: &Membership) -> Result<String, CliError> {
    Ok(format!(
        "{}  member {} plan {} from {} to {} ({})",
        membership.id,
        membership.member_id,
        membership.plan_id,
        membership.start_date,
        gym.registry.membership_end_date(&membership.id)?,
        membership.status
    ))
}
