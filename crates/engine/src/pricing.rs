//! Membership pricing.
//!
//! A plan's effective price is derived from its base price through a
//! [`PricingStrategy`]. The set of strategies is closed: adding a rule means
//! adding a variant and its arm in [`PricingStrategy::apply`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, money::parse_hundredths};

const PERCENT_SCALE: i64 = 100 * 100;

/// A percentage in `[0, 100]` with two decimals of precision.
///
/// Stored as hundredths of a percent, so `12.5%` is `1250`.
///
/// ```rust
/// use gym_engine::Percent;
///
/// let p: Percent = "12.5".parse().unwrap();
/// assert_eq!(p.hundredths(), 1250);
/// assert!("100.01".parse::<Percent>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percent(i64);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const HUNDRED: Percent = Percent(PERCENT_SCALE);

    /// Builds a percentage from hundredths of a percent.
    pub fn from_hundredths(hundredths: i64) -> ResultEngine<Self> {
        if !(0..=PERCENT_SCALE).contains(&hundredths) {
            return Err(EngineError::InvalidDiscount(format!(
                "percent must be between 0 and 100, got {}",
                format_hundredths(hundredths)
            )));
        }
        Ok(Self(hundredths))
    }

    /// Builds a percentage from a whole number of percent.
    pub fn whole(percent: i64) -> ResultEngine<Self> {
        let hundredths = percent.checked_mul(100).ok_or_else(|| {
            EngineError::InvalidDiscount(format!("percent must be between 0 and 100, got {percent}"))
        })?;
        Self::from_hundredths(hundredths)
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }
}

fn format_hundredths(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    if abs % 100 == 0 {
        format!("{sign}{}", abs / 100)
    } else {
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", format_hundredths(self.0))
    }
}

impl FromStr for Percent {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().trim_end_matches('%');
        let hundredths = parse_hundredths(raw).map_err(|err| {
            EngineError::InvalidDiscount(format!("{}: \"{}\"", err.message(), s.trim()))
        })?;
        Self::from_hundredths(hundredths)
    }
}

impl From<Percent> for String {
    fn from(value: Percent) -> Self {
        format_hundredths(value.0)
    }
}

impl TryFrom<String> for Percent {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rule converting a plan's base price into its effective price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingStrategy {
    /// The base price, unchanged.
    #[default]
    NoDiscount,
    /// The base price reduced by `percent`, rounded half-up to the cent.
    PercentOff { percent: Percent },
    /// A flat price that ignores the base price.
    FixedPrice { amount: Money },
}

impl PricingStrategy {
    /// Builds a `PercentOff` strategy.
    pub fn percent_off(percent: Percent) -> Self {
        Self::PercentOff { percent }
    }

    /// Builds a `FixedPrice` strategy, rejecting negative amounts.
    pub fn fixed_price(amount: Money) -> ResultEngine<Self> {
        let amount = amount.ensure_non_negative("fixed price")?;
        Ok(Self::FixedPrice { amount })
    }

    /// Checks the strategy parameters.
    pub fn validate(&self) -> ResultEngine<()> {
        match *self {
            Self::NoDiscount => Ok(()),
            Self::PercentOff { percent } => Percent::from_hundredths(percent.hundredths()).map(|_| ()),
            Self::FixedPrice { amount } => amount.ensure_non_negative("fixed price").map(|_| ()),
        }
    }

    /// Computes the effective price for `base_price`.
    pub fn apply(&self, base_price: Money) -> ResultEngine<Money> {
        let base_price = base_price.ensure_non_negative("base price")?;
        self.validate()?;
        let price = match *self {
            Self::NoDiscount => base_price,
            Self::PercentOff { percent } => {
                base_price.scale_rounded(PERCENT_SCALE - percent.hundredths(), PERCENT_SCALE)
            }
            Self::FixedPrice { amount } => amount,
        };
        Ok(price)
    }

    /// Short machine name of the variant.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoDiscount => "no_discount",
            Self::PercentOff { .. } => "percent_off",
            Self::FixedPrice { .. } => "fixed_price",
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDiscount => f.write_str("no discount"),
            Self::PercentOff { percent } => write!(f, "{percent} off"),
            Self::FixedPrice { amount } => write!(f, "fixed at {amount}"),
        }
    }
}

/// Computes a membership's effective price from a base price and a strategy.
pub fn compute_price(base_price: Money, strategy: &PricingStrategy) -> ResultEngine<Money> {
    strategy.apply(base_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(raw: &str) -> Money {
        raw.parse().unwrap()
    }

    #[test]
    fn no_discount_returns_base_price() {
        let price = compute_price(money("59.99"), &PricingStrategy::NoDiscount).unwrap();
        assert_eq!(price, money("59.99"));
    }

    #[test]
    fn percent_off_twenty_on_hundred_is_eighty() {
        let strategy = PricingStrategy::percent_off(Percent::whole(20).unwrap());
        assert_eq!(compute_price(money("100"), &strategy).unwrap(), money("80.00"));
    }

    #[test]
    fn percent_off_rounds_half_up() {
        let half = PricingStrategy::percent_off(Percent::whole(50).unwrap());
        assert_eq!(compute_price(money("0.05"), &half).unwrap(), money("0.03"));

        let strategy = PricingStrategy::percent_off("12.5".parse().unwrap());
        // 29.99 * 0.875 = 26.24125
        assert_eq!(compute_price(money("29.99"), &strategy).unwrap(), money("26.24"));
    }

    #[test]
    fn percent_off_zero_matches_no_discount() {
        let zero = PricingStrategy::percent_off(Percent::ZERO);
        for raw in ["0", "0.01", "29.99", "59.99", "1234.56"] {
            assert_eq!(
                compute_price(money(raw), &zero).unwrap(),
                compute_price(money(raw), &PricingStrategy::NoDiscount).unwrap()
            );
        }
    }

    #[test]
    fn percent_off_hundred_is_free() {
        let full = PricingStrategy::percent_off(Percent::HUNDRED);
        assert_eq!(compute_price(money("59.99"), &full).unwrap(), Money::ZERO);
    }

    #[test]
    fn percent_out_of_range_is_invalid_discount() {
        for raw in ["-1", "100.01", "250", "abc"] {
            assert!(
                matches!(raw.parse::<Percent>(), Err(EngineError::InvalidDiscount(_))),
                "{raw:?} should be rejected"
            );
        }
        assert!(matches!(Percent::whole(101), Err(EngineError::InvalidDiscount(_))));
        assert!(matches!(
            Percent::from_hundredths(-5),
            Err(EngineError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn fixed_price_ignores_base_and_rejects_negative() {
        let fixed = PricingStrategy::fixed_price(money("19.99")).unwrap();
        assert_eq!(compute_price(money("59.99"), &fixed).unwrap(), money("19.99"));
        assert_eq!(compute_price(Money::ZERO, &fixed).unwrap(), money("19.99"));

        assert!(matches!(
            PricingStrategy::fixed_price(money("-1")),
            Err(EngineError::InvalidAmount(_))
        ));
        let raw = PricingStrategy::FixedPrice { amount: money("-1") };
        assert!(matches!(
            compute_price(money("10"), &raw),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn negative_base_price_is_invalid_amount() {
        assert!(matches!(
            compute_price(money("-10"), &PricingStrategy::NoDiscount),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn prices_are_non_negative_for_every_strategy() {
        let strategies = [
            PricingStrategy::NoDiscount,
            PricingStrategy::percent_off(Percent::ZERO),
            PricingStrategy::percent_off("33.33".parse().unwrap()),
            PricingStrategy::percent_off(Percent::HUNDRED),
            PricingStrategy::fixed_price(Money::ZERO).unwrap(),
            PricingStrategy::fixed_price(money("5")).unwrap(),
        ];
        for strategy in &strategies {
            for cents in [0, 1, 99, 2999, 10_000, 123_456] {
                let first = compute_price(Money::new(cents), strategy).unwrap();
                let second = compute_price(Money::new(cents), strategy).unwrap();
                assert!(!first.is_negative());
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn strategy_serializes_as_tagged_record() {
        let strategy = PricingStrategy::percent_off("12.5".parse().unwrap());
        let json = serde_json::to_value(strategy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "percent_off", "percent": "12.50"})
        );

        let fixed: PricingStrategy =
            serde_json::from_str(r#"{"type":"fixed_price","amount":"19.99"}"#).unwrap();
        assert_eq!(fixed, PricingStrategy::FixedPrice { amount: money("19.99") });

        assert!(
            serde_json::from_str::<PricingStrategy>(r#"{"type":"percent_off","percent":"120"}"#)
                .is_err()
        );
    }
}
