use gym_engine::{NewTrainer, Trainer, TrainerUpdate};

use crate::{
    cli::{TrainerCommand, list_update},
    error::CliError,
};

use super::Store;

pub fn run(command: TrainerCommand, store: &Store) -> Result<(), CliError> {
    let mut gym = store.open()?;
    match command {
        TrainerCommand::Add {
            name,
            email,
            specialties,
            id,
        } => {
            let trainer = gym.registry.add_trainer(NewTrainer {
                id,
                name,
                email,
                specialties,
            })?;
            store.save(&gym)?;
            println!("added trainer {}", line(&trainer));
        }
        TrainerCommand::List => {
            for trainer in gym.registry.trainers() {
                println!("{}", line(trainer));
            }
        }
        TrainerCommand::Show { id } => {
            let trainer = gym.registry.trainer(&id)?;
            println!("{}", line(trainer));
            for member_id in &trainer.members {
                let member = gym.registry.member(member_id)?;
                println!("  member: {} ({})", member.name, member.id);
            }
        }
        TrainerCommand::Update {
            id,
            name,
            email,
            specialties,
            clear_specialties,
        } => {
            let update = TrainerUpdate {
                name,
                email,
                specialties: list_update(specialties, clear_specialties),
            };
            let trainer = gym.registry.update_trainer(&id, update)?;
            store.save(&gym)?;
            println!("updated trainer {}", line(&trainer));
        }
        TrainerCommand::Remove { id } => {
            let trainer = gym.registry.remove_trainer(&id)?;
            store.save(&gym)?;
            println!("removed trainer {}", line(&trainer));
        }
        TrainerCommand::Assign { trainer, member } => {
            gym.registry.assign_trainer(&trainer, &member)?;
            store.save(&gym)?;
            println!("assigned member {member} to trainer {trainer}");
        }
        TrainerCommand::Unassign { trainer, member } => {
            if gym.registry.unassign_trainer(&trainer, &member)? {
                store.save(&gym)?;
                println!("unassigned member {member} from trainer {trainer}");
            } else {
                println!("member {member} was not assigned to trainer {trainer}");
            }
        }
    }
    Ok(())
}

fn line(trainer: &Trainer) -> String {
    let mut line = format!("{}  {} <{}>", trainer.id, trainer.name, trainer.email);
    if !trainer.specialties.is_empty() {
        line.push_str(&format!(" [{}]", trainer.specialties.join(", ")));
    }
    line
}
