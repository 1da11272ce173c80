//! In-memory reference implementation of [`BallotStore`].
//!
//! Deterministic and test-friendly. Supports injecting write failures so
//! the session's rollback path can be exercised.

use crate::traits::BallotStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use ballot_types::{Assignment, Change, MemberId, Position, RoleAssignment};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Serialized form of a store's contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDump {
    pub seats: Vec<Assignment>,
    pub roles: Vec<RoleAssignment>,
}

#[derive(Clone, Debug, Default)]
struct Records {
    seats: BTreeMap<Position, MemberId>,
    roles: BTreeMap<MemberId, RoleAssignment>,
}

impl Records {
    fn apply(&mut self, change: &Change) {
        match change {
            Change::Seat(record) => match &record.member_id {
                Some(member) => {
                    self.seats.insert(record.position, member.clone());
                }
                None => {
                    self.seats.remove(&record.position);
                }
            },
            Change::Roles(assignment) => {
                self.roles
                    .insert(assignment.member_id.clone(), assignment.clone());
            }
            Change::RolesCleared { member_id } => {
                self.roles.remove(member_id);
            }
        }
    }

    fn check_unique_seats(&self) -> StoreResult<()> {
        let mut seen = HashSet::new();
        for (position, member) in &self.seats {
            if !seen.insert(member) {
                return Err(StoreError::Conflict(format!(
                    "{} would hold more than one seat (seen again at {})",
                    member, position
                )));
            }
        }
        Ok(())
    }
}

/// In-memory ballot store.
#[derive(Debug, Default)]
pub struct InMemoryBallotStore {
    records: RwLock<Records>,
    failures_pending: AtomicUsize,
    batches_applied: AtomicUsize,
}

impl InMemoryBallotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled from a dump.
    pub fn from_dump(dump: StoreDump) -> StoreResult<Self> {
        let store = Self::new();
        {
            let mut records = store.write()?;
            for assignment in dump.seats {
                let position = assignment.position;
                if let Some(previous) = records.seats.insert(position, assignment.member_id) {
                    return Err(StoreError::Conflict(format!(
                        "seat {} listed twice in dump (first held by {})",
                        position, previous
                    )));
                }
            }
            for assignment in dump.roles {
                records
                    .roles
                    .insert(assignment.member_id.clone(), assignment);
            }
            records.check_unique_seats()?;
        }
        Ok(store)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Self::from_dump(serde_json::from_str(json)?)
    }

    pub fn dump(&self) -> StoreResult<StoreDump> {
        let records = self.read()?;
        Ok(StoreDump {
            seats: records
                .seats
                .iter()
                .map(|(position, member)| Assignment::new(member.clone(), *position))
                .collect(),
            roles: records.roles.values().cloned().collect(),
        })
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.dump()?)?)
    }

    /// Make the next `count` calls to `apply_changes` fail with
    /// `StoreError::Unavailable`.
    pub fn fail_next_writes(&self, count: usize) {
        self.failures_pending.store(count, Ordering::SeqCst);
    }

    /// Number of batches successfully applied.
    pub fn batches_applied(&self) -> usize {
        self.batches_applied.load(Ordering::SeqCst)
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| StoreError::Backend("records lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| StoreError::Backend("records lock poisoned".to_string()))
    }

    fn take_injected_failure(&self) -> bool {
        self.failures_pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl BallotStore for InMemoryBallotStore {
    async fn apply_changes(&self, changes: &[Change]) -> StoreResult<()> {
        if self.take_injected_failure() {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }

        let mut guard = self.write()?;
        let mut next = guard.clone();
        for change in changes {
            next.apply(change);
        }
        next.check_unique_seats()?;
        *guard = next;
        self.batches_applied.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_seats(&self) -> StoreResult<Vec<Assignment>> {
        let records = self.read()?;
        Ok(records
            .seats
            .iter()
            .map(|(position, member)| Assignment::new(member.clone(), *position))
            .collect())
    }

    async fn load_roles(&self) -> StoreResult<Vec<RoleAssignment>> {
        Ok(self.read()?.roles.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_types::{RoleId, SeatRecord};

    fn m(id: &str) -> MemberId {
        MemberId::new(id)
    }

    #[tokio::test]
    async fn apply_and_load() {
        let store = InMemoryBallotStore::new();
        store
            .apply_changes(&[
                Change::Seat(SeatRecord::occupied(Position::new(2), m("b"))),
                Change::Seat(SeatRecord::occupied(Position::new(1), m("a"))),
            ])
            .await
            .unwrap();

        let seats = store.load_seats().await.unwrap();
        assert_eq!(seats.len(), 2);
        assert_eq!(seats[0], Assignment::new(m("a"), Position::new(1)));
        assert_eq!(store.batches_applied(), 1);
    }

    #[tokio::test]
    async fn swap_batch_is_applied_as_a_whole() {
        let store = InMemoryBallotStore::new();
        store
            .apply_changes(&[
                Change::Seat(SeatRecord::occupied(Position::new(1), m("a"))),
                Change::Seat(SeatRecord::occupied(Position::new(3), m("b"))),
            ])
            .await
            .unwrap();
        store
            .apply_changes(&[
                Change::Seat(SeatRecord::occupied(Position::new(1), m("b"))),
                Change::Seat(SeatRecord::occupied(Position::new(3), m("a"))),
            ])
            .await
            .unwrap();
        let seats = store.load_seats().await.unwrap();
        assert_eq!(seats[0].member_id, m("b"));
        assert_eq!(seats[1].member_id, m("a"));
    }

    #[tokio::test]
    async fn duplicate_seat_conflict_leaves_store_untouched() {
        let store = InMemoryBallotStore::new();
        store
            .apply_changes(&[Change::Seat(SeatRecord::occupied(Position::new(1), m("a")))])
            .await
            .unwrap();
        let result = store
            .apply_changes(&[Change::Seat(SeatRecord::occupied(Position::new(2), m("a")))])
            .await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.load_seats().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn injected_failures_are_consumed() {
        let store = InMemoryBallotStore::new();
        store.fail_next_writes(1);
        let change = [Change::Seat(SeatRecord::occupied(Position::new(1), m("a")))];
        assert!(matches!(
            store.apply_changes(&change).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.apply_changes(&change).await.is_ok());
    }

    #[tokio::test]
    async fn roles_upsert_and_clear() {
        let store = InMemoryBallotStore::new();
        let mut ra = RoleAssignment::new(m("a"));
        ra.roles.insert(RoleId::new("eco"));
        store.apply_changes(&[Change::Roles(ra.clone())]).await.unwrap();
        assert_eq!(store.load_roles().await.unwrap(), vec![ra]);

        store
            .apply_changes(&[Change::RolesCleared { member_id: m("a") }])
            .await
            .unwrap();
        assert!(store.load_roles().await.unwrap().is_empty());
    }

    #[test]
    fn json_dump_round_trip() {
        let dump = StoreDump {
            seats: vec![Assignment::new(m("a"), Position::new(1))],
            roles: vec![],
        };
        let store = InMemoryBallotStore::from_dump(dump.clone()).unwrap();
        let restored = InMemoryBallotStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(restored.dump().unwrap(), dump);
    }

    #[test]
    fn dump_with_seat_listed_twice_is_conflict() {
        let dump = StoreDump {
            seats: vec![
                Assignment::new(m("a"), Position::new(1)),
                Assignment::new(m("b"), Position::new(1)),
            ],
            roles: vec![],
        };
        assert!(matches!(
            InMemoryBallotStore::from_dump(dump),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            InMemoryBallotStore::from_json("[1,2"),
            Err(StoreError::Serialization(_))
        ));
    }
}
