use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use gym_engine::{
    MemberId, MembershipId, MembershipStatus, Money, Percent, PaymentMethod, PlanId,
    PricingStrategy, TrainerId,
};

#[derive(Parser, Debug)]
#[command(name = "gym")]
#[command(about = "Manage a gym's members, trainers, plans and payments", version)]
pub struct Cli {
    /// Store file (also read from `GYM_STORE`). Overrides the settings file.
    #[arg(long, global = true, env = "GYM_STORE")]
    pub store: Option<PathBuf>,

    /// Settings file.
    #[arg(long, global = true, default_value = "gym.toml")]
    pub config: PathBuf,

    /// More log output on stderr (`-v` info, `-vv` debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty store.
    Init(InitArgs),
    /// Headline numbers for the gym.
    Summary,
    #[command(subcommand)]
    Member(MemberCommand),
    #[command(subcommand)]
    Trainer(TrainerCommand),
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    Membership(MembershipCommand),
    #[command(subcommand)]
    Payment(PaymentCommand),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(long)]
    pub name: String,
    /// Replace an existing store.
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Join date (YYYY-MM-DD), today when omitted.
        #[arg(long)]
        joined: Option<NaiveDate>,
        #[arg(long)]
        id: Option<MemberId>,
    },
    List,
    Show {
        id: MemberId,
    },
    Update {
        id: MemberId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Remove {
        id: MemberId,
    },
    Find {
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrainerCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        #[arg(long)]
        id: Option<TrainerId>,
    },
    List,
    Show {
        id: TrainerId,
    },
    Update {
        id: TrainerId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Replaces the whole list when given.
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        /// Remove every specialty.
        #[arg(long, conflicts_with = "specialties")]
        clear_specialties: bool,
    },
    Remove {
        id: TrainerId,
    },
    Assign {
        trainer: TrainerId,
        member: MemberId,
    },
    Unassign {
        trainer: TrainerId,
        member: MemberId,
    },
}

/// Pricing flags shared by the plan commands. At most one may be given.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct StrategyArgs {
    /// Discount in percent, e.g. `20` or `12.5`.
    #[arg(long)]
    pub percent_off: Option<Percent>,
    /// Flat price ignoring the base price.
    #[arg(long)]
    pub fixed_price: Option<Money>,
    /// Charge the base price.
    #[arg(long)]
    pub no_discount: bool,
}

impl StrategyArgs {
    /// The strategy selected by the flags, `None` if none was given.
    pub fn strategy(&self) -> gym_engine::ResultEngine<Option<PricingStrategy>> {
        if let Some(percent) = self.percent_off {
            return Ok(Some(PricingStrategy::percent_off(percent)));
        }
        if let Some(amount) = self.fixed_price {
            return PricingStrategy::fixed_price(amount).map(Some);
        }
        Ok(self.no_discount.then_some(PricingStrategy::NoDiscount))
    }
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        base_price: Money,
        #[arg(long)]
        duration_days: u32,
        #[command(flatten)]
        strategy: StrategyArgs,
        #[arg(long = "benefit")]
        benefits: Vec<String>,
        #[arg(long)]
        id: Option<PlanId>,
    },
    List,
    Show {
        id: PlanId,
    },
    Update {
        id: PlanId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        base_price: Option<Money>,
        #[arg(long)]
        duration_days: Option<u32>,
        #[command(flatten)]
        strategy: StrategyArgs,
        /// Replaces the whole list when given.
        #[arg(long = "benefit")]
        benefits: Vec<String>,
        /// Remove every benefit.
        #[arg(long, conflicts_with = "benefits")]
        clear_benefits: bool,
    },
    Remove {
        id: PlanId,
    },
    /// Effective price of a stored plan, or a quote for a base price.
    Price {
        #[arg(required_unless_present = "base_price")]
        id: Option<PlanId>,
        #[arg(long, conflicts_with = "id")]
        base_price: Option<Money>,
        #[command(flatten)]
        strategy: StrategyArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum MembershipCommand {
    Assign {
        member: MemberId,
        plan: PlanId,
        /// Start date (YYYY-MM-DD), today when omitted.
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    Cancel {
        id: MembershipId,
    },
    /// Expire active memberships whose end date is before `--as-of`.
    Expire {
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    List {
        #[arg(long)]
        member: Option<MemberId>,
        /// Only memberships in this status (active, expired or cancelled).
        #[arg(long, value_parser = parse_status)]
        status: Option<MembershipStatus>,
    },
    Show {
        id: MembershipId,
    },
}

#[derive(Args, Debug)]
pub struct PaymentArgs {
    pub member: MemberId,
    pub membership: MembershipId,
    pub amount: Money,
    #[arg(long, default_value = "card", value_parser = parse_method)]
    pub method: PaymentMethod,
    /// RFC 3339 timestamp, now when omitted.
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommand {
    Record(PaymentArgs),
    Refund(PaymentArgs),
    Statement { member: MemberId },
    Balance { member: MemberId },
    /// Net revenue, for the whole gym or one member.
    Revenue {
        #[arg(long)]
        member: Option<MemberId>,
    },
}

/// How a repeatable list flag changes a stored list: replaced when values
/// are given, emptied with `clear`, otherwise left alone.
pub fn list_update(values: Vec<String>, clear: bool) -> Option<Vec<String>> {
    if clear || !values.is_empty() {
        Some(values)
    } else {
        None
    }
}

fn parse_method(raw: &str) -> Result<PaymentMethod, String> {
    PaymentMethod::try_from(raw).map_err(|err| err.to_string())
}

fn parse_status(raw: &str) -> Result<MembershipStatus, String> {
    MembershipStatus::try_from(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["gym", "summary", "--store", "x.json", "-vv"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("x.json")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Summary));
    }

    #[test]
    fn plan_add_parses_strategy() {
        let cli = Cli::try_parse_from([
            "gym",
            "plan",
            "add",
            "--name",
            "Monthly",
            "--base-price",
            "100.00",
            "--duration-days",
            "30",
            "--percent-off",
            "20",
            "--benefit",
            "Sauna",
        ])
        .unwrap();
        let Command::Plan(PlanCommand::Add {
            base_price,
            strategy,
            benefits,
            ..
        }) = cli.command
        else {
            panic!("expected plan add");
        };
        assert_eq!(base_price, Money::new(10_000));
        assert_eq!(
            strategy.strategy().unwrap(),
            Some(PricingStrategy::percent_off(Percent::whole(20).unwrap()))
        );
        assert_eq!(benefits, vec!["Sauna".to_string()]);
    }

    #[test]
    fn conflicting_strategies_are_rejected() {
        let result = Cli::try_parse_from([
            "gym",
            "plan",
            "price",
            "--base-price",
            "10",
            "--percent-off",
            "5",
            "--fixed-price",
            "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn payment_method_accepts_aliases() {
        let cli = Cli::try_parse_from([
            "gym",
            "payment",
            "record",
            "mem_1",
            "ms_1",
            "80.00",
            "--method",
            "bank-transfer",
        ])
        .unwrap();
        let Command::Payment(PaymentCommand::Record(args)) = cli.command else {
            panic!("expected payment record");
        };
        assert_eq!(args.method, PaymentMethod::BankTransfer);
        assert!(args.at.is_none());
    }

    #[test]
    fn membership_list_filters_by_status() {
        let cli =
            Cli::try_parse_from(["gym", "membership", "list", "--status", "canceled"]).unwrap();
        let Command::Membership(MembershipCommand::List { member, status }) = cli.command else {
            panic!("expected membership list");
        };
        assert!(member.is_none());
        assert_eq!(status, Some(MembershipStatus::Cancelled));
        assert!(Cli::try_parse_from(["gym", "membership", "list", "--status", "paused"]).is_err());
    }

    #[test]
    fn plan_update_can_clear_benefits() {
        let cli = Cli::try_parse_from(["gym", "plan", "update", "plan_1", "--clear-benefits"])
            .unwrap();
        let Command::Plan(PlanCommand::Update {
            benefits,
            clear_benefits,
            ..
        }) = cli.command
        else {
            panic!("expected plan update");
        };
        assert_eq!(list_update(benefits, clear_benefits), Some(Vec::new()));

        let result = Cli::try_parse_from([
            "gym",
            "plan",
            "update",
            "plan_1",
            "--clear-benefits",
            "--benefit",
            "Sauna",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn trainer_update_list_flags() {
        let parse = |args: &[&str]| {
            let cli = Cli::try_parse_from(args).unwrap();
            let Command::Trainer(TrainerCommand::Update {
                specialties,
                clear_specialties,
                ..
            }) = cli.command
            else {
                panic!("expected trainer update");
            };
            list_update(specialties, clear_specialties)
        };
        assert_eq!(parse(&["gym", "trainer", "update", "trn_1"]), None);
        assert_eq!(
            parse(&["gym", "trainer", "update", "trn_1", "--clear-specialties"]),
            Some(Vec::new())
        );
        assert_eq!(
            parse(&["gym", "trainer", "update", "trn_1", "--specialty", "yoga"]),
            Some(vec!["yoga".to_string()])
        );
    }

    #[test]
    fn bad_amount_is_a_parse_error() {
        assert!(Cli::try_parse_from(["gym", "payment", "record", "mem_1", "ms_1", "1.234"]).is_err());
    }
}
