//! Command handlers. Each one loads the store, runs one engine operation,
//! saves when something changed and prints the outcome on stdout.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use gym_engine::{Gym, storage};

use crate::{
    cli::{Command, InitArgs},
    error::CliError,
};

mod members;
mod memberships;
mod payments;
mod plans;
mod trainers;

/// The store file the commands work on.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the gym, failing with a hint when no store was initialized.
    pub fn open(&self) -> Result<Gym, CliError> {
        if !self.path.exists() {
            return Err(CliError::Usage(format!(
                "no store at {}, run `gym init --name <NAME>` first",
                self.path.display()
            )));
        }
        let gym = storage::load_from_path(&self.path)?;
        tracing::info!(
            path = %self.path.display(),
            members = gym.registry.members().len(),
            payments = gym.ledger.len(),
            "loaded store"
        );
        Ok(gym)
    }

    pub fn save(&self, gym: &Gym) -> Result<(), CliError> {
        storage::save_to_path(&self.path, gym)?;
        tracing::info!(path = %self.path.display(), "saved store");
        Ok(())
    }
}

pub fn run(command: Command, store: &Store) -> Result<(), CliError> {
    match command {
        Command::Init(args) => init(args, store),
        Command::Summary => {
            let gym = store.open()?;
            println!("{}", gym.summary()?);
            Ok(())
        }
        Command::Member(command) => members::run(command, store),
        Command::Trainer(command) => trainers::run(command, store),
        Command::Plan(command) => plans::run(command, store),
        Command::Membership(command) => memberships::run(command, store),
        Command::Payment(command) => payments::run(command, store),
    }
}

fn init(args: InitArgs, store: &Store) -> Result<(), CliError> {
    if store.path().exists() && !args.force {
        return Err(CliError::Usage(format!(
            "store already exists at {}, pass --force to replace it",
            store.path().display()
        )));
    }
    let gym = Gym::builder().name(args.name).build()?;
    store.save(&gym)?;
    println!("created store for {} at {}", gym.name(), store.path().display());
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
