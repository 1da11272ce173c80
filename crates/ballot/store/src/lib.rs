#![deny(unsafe_code)]
//! # ballot-store
//!
//! Persistence boundary for the ballot engine.
//!
//! The engine reports every accepted edit as a batch of desired-state
//! [`Change`](ballot_types::Change) records. This crate defines where those
//! batches go and keeps memory and storage in step.
//!
//! ## Key Components
//!
//! - [`BallotStore`]: async storage trait, one atomic batch per edit
//! - [`InMemoryBallotStore`]: reference adapter with write-failure injection
//! - [`EditingSession`]: applies edits optimistically and rolls back to the
//!   last confirmed snapshot when a write fails
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ballot_store::{EditingSession, InMemoryBallotStore};
//! use ballot_types::{GenderCategory, ListConfig, Member, MemberId, Position, RoleCatalog, Roster};
//!
//! # tokio_test_block(async {
//! let roster = Roster::from_members(vec![Member::new("a", "Alice", GenderCategory::female())]).unwrap();
//! let store = Arc::new(InMemoryBallotStore::new());
//! let mut session = EditingSession::load(
//!     ListConfig::default(),
//!     roster,
//!     RoleCatalog::new(vec![]).unwrap(),
//!     store,
//! )
//! .await
//! .unwrap();
//! session.assign(&MemberId::new("a"), Position::new(1)).await.unwrap();
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod memory;
pub mod session;
pub mod traits;

pub use error::{SessionError, SessionResult, StoreError, StoreResult};
pub use memory::{InMemoryBallotStore, StoreDump};
pub use session::{ConfirmedState, EditingSession};
pub use traits::BallotStore;
