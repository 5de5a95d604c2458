//! Typed entity identifiers.
//!
//! Each entity type gets its own newtype so a `MemberId` can never be passed
//! where a `PlanId` is expected. Generated ids look like
//! `mem_5f0c6a2e...` (prefix plus a simple UUID v4); ids supplied by callers
//! only need to pass [`validate_id`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

const MAX_ID_LEN: usize = 64;

/// Validates a caller-supplied identifier and returns it trimmed.
pub(crate) fn validate_id(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidId(format!("{label} id must not be empty")));
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(EngineError::InvalidId(format!(
            "{label} id must be at most {MAX_ID_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(EngineError::InvalidId(format!(
            "{label} id \"{trimmed}\" may only contain letters, digits, '_' and '-'"
        )));
    }
    Ok(trimmed.to_string())
}

/// Declares an identifier newtype with generation, parsing and serde support.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}_{}", Self::PREFIX, Uuid::new_v4().simple()))
            }

            /// Parses and validates an identifier.
            pub fn parse(value: &str) -> ResultEngine<Self> {
                validate_id(value, $label).map(Self)
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EngineError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Member`](crate::Member).
    MemberId,
    "mem",
    "member"
);
entity_id!(
    /// Identifier of a [`Trainer`](crate::Trainer).
    TrainerId,
    "trn",
    "trainer"
);
entity_id!(
    /// Identifier of a [`MembershipPlan`](crate::MembershipPlan).
    PlanId,
    "plan",
    "plan"
);
entity_id!(
    /// Identifier of a [`Membership`](crate::Membership).
    MembershipId,
    "ms",
    "membership"
);
entity_id!(
    /// Identifier of a [`Payment`](crate::Payment).
    PaymentId,
    "pay",
    "payment"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix_and_differ() {
        let a = MemberId::generate();
        let b = MemberId::generate();
        assert!(a.as_str().starts_with("mem_"));
        assert_ne!(a, b);
        assert!(PaymentId::generate().as_str().starts_with("pay_"));
    }

    #[test]
    fn parse_trims_and_accepts_simple_ids() {
        assert_eq!(MemberId::parse("  alice-01 ").unwrap().as_str(), "alice-01");
        assert_eq!(PlanId::parse("basic_monthly").unwrap().as_str(), "basic_monthly");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        let too_long = "x".repeat(65);
        for raw in ["", "   ", "has space", "semi;colon", too_long.as_str()] {
            assert!(
                matches!(MemberId::parse(raw), Err(EngineError::InvalidId(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn serde_rejects_invalid_ids() {
        let id: TrainerId = serde_json::from_str("\"trn_1\"").unwrap();
        assert_eq!(id.as_str(), "trn_1");
        assert!(serde_json::from_str::<TrainerId>("\"\"").is_err());
    }
}
