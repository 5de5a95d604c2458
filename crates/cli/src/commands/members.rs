use gym_engine::{Member, MemberUpdate, NewMember};

use crate::{cli::MemberCommand, error::CliError};

use super::{Store, today};

pub fn run(command: MemberCommand, store: &Store) -> Result<(), CliError> {
    let mut gym = store.open()?;
    match command {
        MemberCommand::Add {
            name,
            email,
            joined,
            id,
        } => {
            let mut new = NewMember::new(name, email, joined.unwrap_or_else(today));
            new.id = id;
            let member = gym.registry.register_member(new)?;
            store.save(&gym)?;
            println!("registered member {}", line(&member));
        }
        MemberCommand::List => {
            for member in gym.registry.members() {
                println!("{}", line(member));
            }
        }
        MemberCommand::Show { id } => {
            let member = gym.registry.member(&id)?;
            println!("{}", line(member));
            match gym.registry.active_membership(&id)? {
                Some(membership) => println!(
                    "  active membership: {} on plan {} until {}",
                    membership.id,
                    membership.plan_id,
                    gym.registry.membership_end_date(&membership.id)?
                ),
                None => println!("  no active membership"),
            }
            for trainer in gym.registry.trainers_for_member(&id)? {
                println!("  trainer: {} ({})", trainer.name, trainer.id);
            }
            println!("  balance: {}", gym.balance_for(&id)?);
        }
        MemberCommand::Update { id, name, email } => {
            let member = gym
                .registry
                .update_member(&id, MemberUpdate { name, email })?;
            store.save(&gym)?;
            println!("updated member {}", line(&member));
        }
        MemberCommand::Remove { id } => {
            let member = gym.registry.remove_member(&id)?;
            store.save(&gym)?;
            println!("removed member {}", line(&member));
        }
        MemberCommand::Find { email } => match gym.registry.find_member_by_email(&email) {
            Some(member) => println!("{}", line(member)),
            None => println!("no member with email {email}"),
        },
    }
    Ok(())
}

fn line(member: &Member) -> String {
    format!(
        "{}  {} <{}> joined {}",
        member.id, member.name, member.email, member.join_date
    )
}
