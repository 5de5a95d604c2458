use chrono::Utc;
use gym_engine::Payment;

use crate::{
    cli::{PaymentArgs, PaymentCommand},
    error::CliError,
};

use super::Store;

pub fn run(command: PaymentCommand, store: &Store) -> Result<(), CliError> {
    let mut gym = store.open()?;
    match command {
        PaymentCommand::Record(args) => {
            let PaymentArgs {
                member,
                membership,
                amount,
                method,
                at,
            } = args;
            let payment = gym.record_payment(
                &member,
                &membership,
                amount,
                method,
                at.unwrap_or_else(Utc::now),
            )?;
            store.save(&gym)?;
            println!("recorded {}", line(&payment));
            println!("balance: {}", gym.balance_for(&member)?);
        }
        PaymentCommand::Refund(args) => {
            let PaymentArgs {
                member,
                membership,
                amount,
                method,
                at,
            } = args;
            let refund = gym.record_refund(
                &member,
                &membership,
                amount,
                method,
                at.unwrap_or_else(Utc::now),
            )?;
            store.save(&gym)?;
            println!("recorded {}", line(&refund));
            println!("balance: {}", gym.balance_for(&member)?);
        }
        PaymentCommand::Statement { member } => {
            let statement = gym.statement_for(&member)?;
            for payment in &statement {
                println!("{}", line(payment));
            }
            if statement.is_empty() {
                println!("no ledger entries for member {member}");
            }
        }
        PaymentCommand::Balance { member } => {
            println!("{}", gym.balance_for(&member)?);
        }
        PaymentCommand::Revenue { member } => match member {
            Some(member) => println!("{}", gym.ledger.total_paid_by(&gym.registry, &member)?),
            None => println!("{}", gym.ledger.total_revenue()?),
        },
    }
    Ok(())
}

fn line(payment: &Payment) -> String {
    format!(
        "{}  {} {} {} for membership {} at {}",
        payment.id(),
        payment.kind(),
        payment.amount(),
        payment.method(),
        payment.membership_id(),
        payment.timestamp().to_rfc3339()
    )
}
