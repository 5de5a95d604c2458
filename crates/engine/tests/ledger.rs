use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use gym_engine::{
    EngineError, Gym, MemberId, MembershipId, Money, NewMember, NewPlan, PaymentKind,
    PaymentMethod, Percent, PricingStrategy,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn money(value: &str) -> Money {
    value.parse().unwrap()
}

/// A gym with one member on a 100.00 plan discounted by 20%.
fn gym_with_membership() -> (Gym, MemberId, MembershipId) {
    let mut gym = Gym::builder().name("Iron Temple").build().unwrap();
    let plan = gym
        .registry
        .create_plan(
            NewPlan::new("Monthly", money("100.00"), 30)
                .strategy(PricingStrategy::percent_off(Percent::whole(20).unwrap())),
        )
        .unwrap();
    let member = gym
        .registry
        .register_member(NewMember::new("Ada", "ada@example.com", date(2024, 1, 1)))
        .unwrap();
    let membership = gym
        .registry
        .assign_membership(&member.id, &plan.id, date(2024, 1, 1))
        .unwrap();
    (gym, member.id, membership.id)
}

#[test]
fn balance_tracks_price_payments_and_overpayment() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    assert_eq!(gym.balance_for(&member_id).unwrap(), money("80.00"));

    gym.record_payment(&member_id, &membership_id, money("80.00"), PaymentMethod::Card, at(2, 9))
        .unwrap();
    assert_eq!(gym.balance_for(&member_id).unwrap(), Money::ZERO);

    gym.record_payment(&member_id, &membership_id, money("20.00"), PaymentMethod::Cash, at(3, 9))
        .unwrap();
    assert_eq!(gym.balance_for(&member_id).unwrap(), money("-20.00"));
}

#[test]
fn refund_raises_balance() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    gym.record_payment(&member_id, &membership_id, money("80.00"), PaymentMethod::Card, at(2, 9))
        .unwrap();

    let refund = gym
        .record_refund(&member_id, &membership_id, money("30.00"), PaymentMethod::Card, at(4, 9))
        .unwrap();
    assert_eq!(refund.kind(), PaymentKind::Refund);
    assert_eq!(gym.ledger.payment(refund.id()).unwrap(), &refund);
    assert_eq!(gym.balance_for(&member_id).unwrap(), money("30.00"));
    assert_eq!(
        gym.ledger.total_paid_by(&gym.registry, &member_id).unwrap(),
        money("50.00")
    );
    assert_eq!(gym.ledger.total_revenue().unwrap(), money("50.00"));
}

#[test]
fn invalid_payments_leave_ledger_untouched() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    let other = gym
        .registry
        .register_member(NewMember::new("Bob", "bob@example.com", date(2024, 1, 2)))
        .unwrap();

    let err = gym
        .record_payment(&member_id, &membership_id, money("-5.00"), PaymentMethod::Card, at(2, 9))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = gym
        .record_payment(&other.id, &membership_id, money("5.00"), PaymentMethod::Card, at(2, 9))
        .unwrap_err();
    assert!(matches!(err, EngineError::MembershipMismatch(_)));

    let ghost = MembershipId::parse("ms_ghost").unwrap();
    let err = gym
        .record_payment(&member_id, &ghost, money("5.00"), PaymentMethod::Card, at(2, 9))
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));

    assert!(gym.ledger.is_empty());
    assert_eq!(gym.balance_for(&member_id).unwrap(), money("80.00"));
}

#[test]
fn zero_amount_is_accepted() {
    let (mut gym, member_id, membership_id) = gym_with_membership();

    gym.record_payment(&member_id, &membership_id, Money::ZERO, PaymentMethod::Other, at(2, 9))
        .unwrap();
    assert_eq!(gym.ledger.len(), 1);
    assert_eq!(gym.balance_for(&member_id).unwrap(), money("80.00"));
}

#[test]
fn balance_does_not_depend_on_recording_order() {
    let amounts = ["10.00", "25.50", "4.50"];
    let (mut forward, member_id, membership_id) = gym_with_membership();
    for (i, amount) in amounts.iter().enumerate() {
        forward
            .record_payment(
                &member_id,
                &membership_id,
                money(amount),
                PaymentMethod::Card,
                at(2 + i as u32, 9),
            )
            .unwrap();
    }

    let (mut backward, member_id_b, membership_id_b) = gym_with_membership();
    for (i, amount) in amounts.iter().enumerate().rev() {
        backward
            .record_payment(
                &member_id_b,
                &membership_id_b,
                money(amount),
                PaymentMethod::Card,
                at(2 + i as u32, 9),
            )
            .unwrap();
    }

    assert_eq!(forward.balance_for(&member_id).unwrap(), money("40.00"));
    assert_eq!(backward.balance_for(&member_id_b).unwrap(), money("40.00"));
}

#[test]
fn statement_is_ordered_by_timestamp_with_stable_ties() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    let late = gym
        .record_payment(&member_id, &membership_id, money("1.00"), PaymentMethod::Card, at(5, 9))
        .unwrap();
    let tie_first = gym
        .record_payment(&member_id, &membership_id, money("2.00"), PaymentMethod::Card, at(3, 9))
        .unwrap();
    let tie_second = gym
        .record_payment(&member_id, &membership_id, money("3.00"), PaymentMethod::Card, at(3, 9))
        .unwrap();

    let ids: Vec<_> = gym
        .statement_for(&member_id)
        .unwrap()
        .into_iter()
        .map(|payment| payment.id().clone())
        .collect();
    assert_eq!(ids, vec![tie_first.id().clone(), tie_second.id().clone(), late.id().clone()]);
}

#[test]
fn history_survives_member_removal() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    gym.record_payment(&member_id, &membership_id, money("80.00"), PaymentMethod::Card, at(2, 9))
        .unwrap();
    gym.registry.cancel_membership(&membership_id).unwrap();
    gym.registry.remove_member(&member_id).unwrap();

    assert!(matches!(
        gym.balance_for(&member_id),
        Err(EngineError::NotFound(_))
    ));
    assert_eq!(gym.statement_for(&member_id).unwrap().len(), 1);
    assert_eq!(gym.ledger.total_revenue().unwrap(), money("80.00"));
}

#[test]
fn summary_counts_members_and_revenue() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    gym.registry
        .register_member(NewMember::new("Bob", "bob@example.com", date(2024, 1, 2)))
        .unwrap();
    gym.record_payment(&member_id, &membership_id, money("80.00"), PaymentMethod::Card, at(2, 9))
        .unwrap();

    let summary = gym.summary().unwrap();
    assert_eq!(summary.members, 2);
    assert_eq!(summary.active_members, 1);
    assert_eq!(summary.inactive_members, 1);
    assert_eq!(summary.plans, 1);
    assert_eq!(summary.payments, 1);
    assert_eq!(summary.revenue, money("80.00"));
    assert!(summary.to_string().starts_with("Gym: Iron Temple"));
}

#[test]
fn entries_that_overflow_totals_are_rejected() {
    let (mut gym, member_id, membership_id) = gym_with_membership();
    let huge = Money::new(i64::MAX);
    gym.record_payment(&member_id, &membership_id, huge, PaymentMethod::Card, at(2, 9))
        .unwrap();

    for amount in [huge, money("1.00")] {
        let err = gym
            .record_payment(&member_id, &membership_id, amount, PaymentMethod::Card, at(3, 9))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
    assert_eq!(gym.ledger.len(), 1);

    // Every derived total still reads after the rejected entries.
    assert_eq!(
        gym.balance_for(&member_id).unwrap(),
        Money::new(8_000 - i64::MAX)
    );
    assert_eq!(gym.ledger.total_paid_by(&gym.registry, &member_id).unwrap(), huge);
    assert_eq!(gym.summary().unwrap().revenue, huge);

    // A refund brings the total back into range.
    gym.record_refund(&member_id, &membership_id, huge, PaymentMethod::Card, at(4, 9))
        .unwrap();
    assert_eq!(gym.ledger.total_revenue().unwrap(), Money::ZERO);
    assert_eq!(gym.balance_for(&member_id).unwrap(), money("80.00"));
}
