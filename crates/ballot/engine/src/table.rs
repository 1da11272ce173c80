//! Fixed-size seat table.
//!
//! Seats `1..=N` map to slots `0..N` of a vector allocated once. A reverse
//! index answers "where does this member sit" without scanning.
//!
//! Invariant: a member appears in at most one slot, and the reverse index
//! mirrors the slots exactly.

use ballot_types::{Assignment, BallotError, BallotResult, MemberId, Position, TableSnapshot};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct PositionTable {
    seats: Vec<Option<MemberId>>,
    index: HashMap<MemberId, Position>,
}

impl PositionTable {
    /// An all-empty table of `seat_count` seats.
    pub fn new(seat_count: u32) -> Self {
        Self {
            seats: vec![None; seat_count as usize],
            index: HashMap::new(),
        }
    }

    /// Rebuild a table from a snapshot, rejecting out-of-range seats and
    /// duplicate occupancy.
    pub fn from_snapshot(snapshot: &TableSnapshot) -> BallotResult<Self> {
        let mut table = Self::new(snapshot.seat_count);
        for assignment in &snapshot.assignments {
            let slot = table.slot(assignment.position)?;
            if let Some(occupant) = &table.seats[slot] {
                return Err(BallotError::InconsistentSnapshot(format!(
                    "seat {} listed twice ({} and {})",
                    assignment.position, occupant, assignment.member_id
                )));
            }
            if let Some(previous) = table.index.get(&assignment.member_id) {
                return Err(BallotError::InconsistentSnapshot(format!(
                    "{} holds both seat {} and seat {}",
                    assignment.member_id, previous, assignment.position
                )));
            }
            table.put(assignment.position, assignment.member_id.clone())?;
        }
        Ok(table)
    }

    pub fn seat_count(&self) -> u32 {
        self.seats.len() as u32
    }

    pub fn occupant(&self, position: Position) -> BallotResult<Option<&MemberId>> {
        let slot = self.slot(position)?;
        Ok(self.seats[slot].as_ref())
    }

    pub fn position_of(&self, member: &MemberId) -> Option<Position> {
        self.index.get(member).copied()
    }

    pub fn is_seated(&self, member: &MemberId) -> bool {
        self.index.contains_key(member)
    }

    /// Every seat in order with its occupant.
    pub fn seats(&self) -> impl Iterator<Item = (Position, Option<&MemberId>)> + '_ {
        self.seats
            .iter()
            .enumerate()
            .map(|(slot, occupant)| (Position::new(slot as u32 + 1), occupant.as_ref()))
    }

    pub fn filled_count(&self) -> usize {
        self.index.len()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            seat_count: self.seat_count(),
            assignments: self
                .seats()
                .filter_map(|(position, occupant)| {
                    occupant.map(|m| Assignment::new(m.clone(), position))
                })
                .collect(),
        }
    }

    /// Put `member` on an empty seat. The caller vacates any previous seat
    /// first.
    pub(crate) fn put(&mut self, position: Position, member: MemberId) -> BallotResult<()> {
        let slot = self.slot(position)?;
        debug_assert!(self.seats[slot].is_none());
        debug_assert!(!self.index.contains_key(&member));
        self.index.insert(member.clone(), position);
        self.seats[slot] = Some(member);
        Ok(())
    }

    /// Empty a seat, returning its former occupant.
    pub(crate) fn vacate(&mut self, position: Position) -> BallotResult<Option<MemberId>> {
        let slot = self.slot(position)?;
        let previous = self.seats[slot].take();
        if let Some(member) = &previous {
            self.index.remove(member);
        }
        Ok(previous)
    }

    /// Check the slot/index mirror. Used by tests after every operation.
    pub fn is_consistent(&self) -> bool {
        let occupied = self.seats.iter().filter(|s| s.is_some()).count();
        occupied == self.index.len()
            && self.index.iter().all(|(member, position)| {
                self.seats
                    .get(position.index() as usize - 1)
                    .and_then(|s| s.as_ref())
                    == Some(member)
            })
    }

    fn slot(&self, position: Position) -> BallotResult<usize> {
        let index = position.index();
        if index == 0 || index > self.seat_count() {
            return Err(BallotError::InvalidPosition {
                position: index,
                seat_count: self.seat_count(),
            });
        }
        Ok(index as usize - 1)
    }
}
