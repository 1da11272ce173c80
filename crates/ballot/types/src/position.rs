use crate::MemberId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A seat on the ordered candidate list, numbered from 1.
///
/// Positions are never created or destroyed at runtime; whether a given
/// index is in range depends on the list's configured seat count and is
/// checked by the position table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub u32);

impl Position {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }

    /// Whether the seat number is odd (seat 1 is odd).
    pub fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }
}

impl From<u32> for Position {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Binding of one member to one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub member_id: MemberId,
    pub position: Position,
}

impl Assignment {
    pub fn new(member_id: MemberId, position: Position) -> Self {
        Self {
            member_id,
            position,
        }
    }
}

/// Point-in-time copy of a list's seat occupancy.
///
/// Used to initialize a table from storage and to roll an editing session
/// back to its last confirmed state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub seat_count: u32,
    /// Occupied seats only, in seat order.
    pub assignments: Vec<Assignment>,
}

impl TableSnapshot {
    pub fn empty(seat_count: u32) -> Self {
        Self {
            seat_count,
            assignments: Vec::new(),
        }
    }

    pub fn occupant(&self, position: Position) -> Option<&MemberId> {
        self.assignments
            .iter()
            .find(|a| a.position == position)
            .map(|a| &a.member_id)
    }
}
