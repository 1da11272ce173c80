use crate::parity::ParityPolicy;
use crate::table::PositionTable;
use ballot_types::{
    BallotError, BallotResult, Change, ListConfig, Member, MemberId, Position, Roster, SeatRecord,
    TableSnapshot,
};
use tracing::{debug, info, warn};

/// The single authority for seat ↔ member bindings.
///
/// Every operation validates against the parity policy and the uniqueness
/// invariant before touching the table; a rejected operation leaves the
/// table exactly as it was. Accepted operations return the new state of
/// each seat they touched.
#[derive(Clone, Debug)]
pub struct AssignmentEngine {
    config: ListConfig,
    policy: ParityPolicy,
    roster: Roster,
    table: PositionTable,
}

impl AssignmentEngine {
    /// An engine over an all-empty list.
    pub fn new(config: ListConfig, roster: Roster) -> BallotResult<Self> {
        let policy = ParityPolicy::new(&config)?;
        let table = PositionTable::new(config.seat_count);
        info!(list = %config.name, seats = config.seat_count, candidates = roster.len(), "Assignment engine ready");
        Ok(Self {
            config,
            policy,
            roster,
            table,
        })
    }

    /// An engine initialized from a stored snapshot.
    pub fn with_snapshot(
        config: ListConfig,
        roster: Roster,
        snapshot: &TableSnapshot,
    ) -> BallotResult<Self> {
        let mut engine = Self::new(config, roster)?;
        engine.restore(snapshot)?;
        Ok(engine)
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn policy(&self) -> &ParityPolicy {
        &self.policy
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    pub fn occupant(&self, position: Position) -> BallotResult<Option<&Member>> {
        Ok(self
            .table
            .occupant(position)?
            .and_then(|id| self.roster.get(id)))
    }

    pub fn position_of(&self, member: &MemberId) -> Option<Position> {
        self.table.position_of(member)
    }

    /// Roster members without a seat, in roster order.
    pub fn unassigned_members(&self) -> Vec<&Member> {
        self.roster
            .iter()
            .filter(|m| !self.table.is_seated(&m.id))
            .collect()
    }

    /// Place `member` on `position`.
    ///
    /// If the member already sits elsewhere, that seat is vacated in the same
    /// step. Assigning a member to the seat they already hold changes nothing.
    pub fn assign(&mut self, member: &MemberId, position: Position) -> BallotResult<Vec<Change>> {
        if let Err(err) = self.check_assign(member, position) {
            warn!(member = %member, position = %position, code = err.code(), "Assignment rejected");
            return Err(err);
        }
        if self.table.position_of(member) == Some(position) {
            return Ok(Vec::new());
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.table.position_of(member) {
            self.table.vacate(previous)?;
            changes.push(Change::Seat(SeatRecord::empty(previous)));
        }
        self.table.put(position, member.clone())?;
        changes.push(Change::Seat(SeatRecord::occupied(position, member.clone())));

        debug!(member = %member, position = %position, moved = changes.len() > 1, "Member assigned");
        Ok(changes)
    }

    /// Empty `position`. Emptying an already empty seat is a no-op.
    pub fn unassign(&mut self, position: Position) -> BallotResult<Vec<Change>> {
        match self.table.vacate(position)? {
            Some(member) => {
                debug!(member = %member, position = %position, "Seat vacated");
                Ok(vec![Change::Seat(SeatRecord::empty(position))])
            }
            None => Ok(Vec::new()),
        }
    }

    /// Vacate whatever seat `member` holds. Used when a member is withdrawn
    /// from the list.
    pub fn vacate_member(&mut self, member: &MemberId) -> BallotResult<Vec<Change>> {
        self.roster.require(member)?;
        match self.table.position_of(member) {
            Some(position) => self.unassign(position),
            None => Ok(Vec::new()),
        }
    }

    /// Exchange the occupants of two seats.
    ///
    /// Both resulting placements are checked before either is committed.
    /// One side may be empty, in which case this is a move.
    pub fn swap(&mut self, a: Position, b: Position) -> BallotResult<Vec<Change>> {
        self.policy.check_range(a)?;
        self.policy.check_range(b)?;
        if a == b {
            return Ok(Vec::new());
        }

        let at_a = self.table.occupant(a)?.cloned();
        let at_b = self.table.occupant(b)?.cloned();
        if at_a.is_none() && at_b.is_none() {
            return Ok(Vec::new());
        }

        let checked = at_a
            .as_ref()
            .map_or(Ok(()), |m| self.check_parity(m, b))
            .and_then(|_| at_b.as_ref().map_or(Ok(()), |m| self.check_parity(m, a)));
        if let Err(err) = checked {
            warn!(from = %a, to = %b, code = err.code(), "Swap rejected");
            return Err(err);
        }

        self.table.vacate(a)?;
        self.table.vacate(b)?;
        if let Some(member) = &at_a {
            self.table.put(b, member.clone())?;
        }
        if let Some(member) = &at_b {
            self.table.put(a, member.clone())?;
        }

        debug!(from = %a, to = %b, "Seats swapped");
        Ok(vec![
            Change::Seat(SeatRecord {
                position: a,
                member_id: at_b,
            }),
            Change::Seat(SeatRecord {
                position: b,
                member_id: at_a,
            }),
        ])
    }

    /// Whether `assign(member, position)` would be accepted. Never mutates.
    ///
    /// Unknown members and out-of-range seats answer `false`.
    pub fn is_move_allowed(&self, member: &MemberId, position: Position) -> bool {
        self.check_assign(member, position).is_ok()
    }

    /// Copy of the current seat occupancy.
    pub fn snapshot(&self) -> TableSnapshot {
        self.table.snapshot()
    }

    /// Replace the table with `snapshot`.
    ///
    /// Range, uniqueness and roster membership are enforced. Parity is not:
    /// a snapshot saved under a different rule still loads, and the list
    /// audit reports the offending seats.
    pub fn restore(&mut self, snapshot: &TableSnapshot) -> BallotResult<()> {
        if snapshot.seat_count != self.config.seat_count {
            return Err(BallotError::InconsistentSnapshot(format!(
                "snapshot has {} seats, list has {}",
                snapshot.seat_count, self.config.seat_count
            )));
        }
        if let Some(unknown) = snapshot
            .assignments
            .iter()
            .find(|a| !self.roster.contains(&a.member_id))
        {
            return Err(BallotError::UnknownMember(unknown.member_id.clone()));
        }
        self.table = PositionTable::from_snapshot(snapshot)?;
        debug!(filled = self.table.filled_count(), "Table restored");
        Ok(())
    }

    fn check_assign(&self, member: &MemberId, position: Position) -> BallotResult<()> {
        self.policy.check_range(position)?;
        self.roster.require(member)?;
        if let Some(occupant) = self.table.occupant(position)? {
            if occupant != member {
                return Err(BallotError::PositionOccupied {
                    position,
                    occupant: occupant.clone(),
                });
            }
        }
        self.check_parity(member, position)
    }

    fn check_parity(&self, member: &MemberId, position: Position) -> BallotResult<()> {
        let member = self.roster.require(member)?;
        self.policy.check(position, member)
    }
}
