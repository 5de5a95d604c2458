//! The module contains the errors the engine can return.
//!
//! Every operation either completes fully or returns one of these errors
//! without touching the state. The engine never logs them: callers decide how
//! to present them.
//!
//! The domain errors are:
//!
//! - [`NotFound`] when an identifier does not resolve.
//! - [`DuplicateIdentifier`] when an explicit id (or e-mail) is already taken.
//! - [`ConflictingActiveMembership`] when a member already holds an active
//!   membership.
//! - [`CorruptDocument`] when a persisted document fails validation on load.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`DuplicateIdentifier`]: EngineError::DuplicateIdentifier
//!  [`ConflictingActiveMembership`]: EngineError::ConflictingActiveMembership
//!  [`CorruptDocument`]: EngineError::CorruptDocument
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("\"{0}\" already present!")]
    DuplicateIdentifier(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),
    #[error("Member \"{0}\" already has an active membership")]
    ConflictingActiveMembership(String),
    #[error("Member \"{0}\" still has an active membership")]
    HasActiveMembership(String),
    #[error("Membership mismatch: {0}")]
    MembershipMismatch(String),
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid value: {0}")]
    Validation(String),
    #[error("Plan \"{0}\" is still referenced by memberships")]
    PlanInUse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Stable name of the error kind, suitable for display.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::DuplicateIdentifier(_) => "DuplicateIdentifier",
            Self::InvalidAmount(_) => "InvalidAmount",
            Self::InvalidDiscount(_) => "InvalidDiscount",
            Self::ConflictingActiveMembership(_) => "ConflictingActiveMembership",
            Self::HasActiveMembership(_) => "HasActiveMembership",
            Self::MembershipMismatch(_) => "MembershipMismatch",
            Self::CorruptDocument(_) => "CorruptDocument",
            Self::InvalidId(_) => "InvalidId",
            Self::Validation(_) => "Validation",
            Self::PlanInUse(_) => "PlanInUse",
            Self::Io(_) => "Io",
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::DuplicateIdentifier(a), Self::DuplicateIdentifier(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDiscount(a), Self::InvalidDiscount(b)) => a == b,
            (Self::ConflictingActiveMembership(a), Self::ConflictingActiveMembership(b)) => a == b,
            (Self::HasActiveMembership(a), Self::HasActiveMembership(b)) => a == b,
            (Self::MembershipMismatch(a), Self::MembershipMismatch(b)) => a == b,
            (Self::CorruptDocument(a), Self::CorruptDocument(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::PlanInUse(a), Self::PlanInUse(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind() && a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
