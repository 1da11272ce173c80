use crate::{MemberId, Position, RoleAssignment};
use serde::{Deserialize, Serialize};

/// Desired state of a single seat after an accepted edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub position: Position,
    pub member_id: Option<MemberId>,
}

impl SeatRecord {
    pub fn occupied(position: Position, member_id: MemberId) -> Self {
        Self {
            position,
            member_id: Some(member_id),
        }
    }

    pub fn empty(position: Position) -> Self {
        Self {
            position,
            member_id: None,
        }
    }
}

/// A record the persistence layer should upsert or delete.
///
/// Every accepted mutation yields the full new state of each record it
/// touched, never a delta, so the store can apply them with plain upserts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    Seat(SeatRecord),
    Roles(RoleAssignment),
    RolesCleared { member_id: MemberId },
}

impl Change {
    pub fn is_seat(&self) -> bool {
        matches!(self, Self::Seat(_))
    }
}
