//! Error taxonomy for the ballot engine.
//!
//! Two classes of failure come out of the engine:
//! - **constraint violations**: the caller asked for an edit the rules forbid
//!   (wrong gender for the seat, seat taken, primary role not held). These are
//!   expected and are shown to the operator.
//! - **programmer errors**: the caller referenced something that cannot exist
//!   (seat outside the list, unknown member or role, broken configuration).
//!
//! Persistence failures never originate here.

use crate::{GenderCategory, MemberId, Position, RoleId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for ballot operations
pub type BallotResult<T> = Result<T, BallotError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BallotError {
    #[error("parity violation at seat {position}: expects {expected}, {member} is {actual}")]
    ParityViolation {
        position: Position,
        member: MemberId,
        expected: GenderCategory,
        actual: GenderCategory,
    },

    #[error("seat {position} is already held by {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: MemberId,
    },

    #[error("{member} does not hold {role}")]
    RoleNotHeld { member: MemberId, role: RoleId },

    #[error("seat #{position} is outside the list (1..={seat_count})")]
    InvalidPosition { position: u32, seat_count: u32 },

    #[error("unknown member: {0}")]
    UnknownMember(MemberId),

    #[error("unknown role: {0}")]
    UnknownRole(RoleId),

    #[error("duplicate member: {0}")]
    DuplicateMember(MemberId),

    #[error("inconsistent snapshot: {0}")]
    InconsistentSnapshot(String),

    #[error("invalid list configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`BallotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Expected, recoverable; surface to the operator.
    ConstraintViolation,
    /// Caller bug.
    ProgrammerError,
}

impl BallotError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ParityViolation { .. } | Self::PositionOccupied { .. } | Self::RoleNotHeld { .. } => {
                ErrorClass::ConstraintViolation
            }
            _ => ErrorClass::ProgrammerError,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.class() == ErrorClass::ConstraintViolation
    }

    pub fn is_programmer_error(&self) -> bool {
        self.class() == ErrorClass::ProgrammerError
    }

    /// Stable machine-readable code for user-facing messaging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParityViolation { .. } => "PARITY_VIOLATION",
            Self::PositionOccupied { .. } => "POSITION_OCCUPIED",
            Self::RoleNotHeld { .. } => "ROLE_NOT_HELD",
            Self::InvalidPosition { .. } => "INVALID_POSITION",
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::DuplicateMember(_) => "DUPLICATE_MEMBER",
            Self::InconsistentSnapshot(_) => "INCONSISTENT_SNAPSHOT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
