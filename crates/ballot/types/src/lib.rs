#![deny(unsafe_code)]
//! # ballot-types
//!
//! Domain types for electoral list composition: candidate members, seats,
//! thematic roles, list configuration, and the error taxonomy shared by the
//! engine and the persistence boundary.

pub mod change;
pub mod config;
pub mod error;
pub mod ids;
pub mod member;
pub mod position;
pub mod role;

pub use change::{Change, SeatRecord};
pub use config::{ListConfig, ParityConfig, DEFAULT_SEAT_COUNT, MAX_SEAT_COUNT};
pub use error::{BallotError, BallotResult, ErrorClass};
pub use ids::{GenderCategory, MemberId, RoleId};
pub use member::{Member, Roster};
pub use position::{Assignment, Position, TableSnapshot};
pub use role::{RoleAssignment, RoleCatalog, ThematicRole};
