#![deny(unsafe_code)]
//! # ballot-engine
//!
//! Seat assignment for an electoral list under the gender parity rule, and
//! thematic role bookkeeping for the candidates.
//!
//! ## Key Components
//!
//! - [`ParityPolicy`]: which gender category each seat expects
//! - [`PositionTable`]: the fixed, ordered seats and who holds them
//! - [`AssignmentEngine`]: `assign`, `unassign`, `swap`, `is_move_allowed`
//! - [`RoleBook`]: held roles and the single primary role per member
//! - [`ListReport`]: completeness and parity audit of the current fill
//!
//! The engine is synchronous and holds no locks. Each accepted mutation
//! returns the [`Change`](ballot_types::Change) records the caller should
//! persist; each rejected one returns a typed
//! [`BallotError`](ballot_types::BallotError) and leaves state untouched.
//!
//! ## Example
//!
//! ```rust
//! use ballot_engine::AssignmentEngine;
//! use ballot_types::{GenderCategory, ListConfig, Member, MemberId, Position, Roster};
//!
//! let roster = Roster::from_members(vec![
//!     Member::new("m-1", "Alice", GenderCategory::female()),
//!     Member::new("m-2", "Bruno", GenderCategory::male()),
//! ])
//! .unwrap();
//! let mut engine = AssignmentEngine::new(ListConfig::default(), roster).unwrap();
//!
//! assert!(!engine.is_move_allowed(&MemberId::new("m-2"), Position::new(1)));
//! engine.assign(&MemberId::new("m-1"), Position::new(1)).unwrap();
//! engine.assign(&MemberId::new("m-2"), Position::new(2)).unwrap();
//! ```

pub mod assignment;
pub mod audit;
pub mod parity;
pub mod roles;
pub mod table;

pub use assignment::AssignmentEngine;
pub use audit::{ListReport, ParityIssue};
pub use parity::ParityPolicy;
pub use roles::RoleBook;
pub use table::PositionTable;
