//! Optimistic editing session.
//!
//! The session applies each edit to the in-memory engine first, then
//! persists the resulting changes. If the store refuses them, the engine and
//! the role book are restored to the last confirmed snapshot so memory never
//! runs ahead of storage.

use crate::traits::BallotStore;
use crate::{SessionError, SessionResult};
use ballot_engine::{AssignmentEngine, ListReport, RoleBook};
use ballot_types::{
    Change, ListConfig, MemberId, Position, RoleAssignment, RoleCatalog, RoleId, Roster,
    TableSnapshot,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The last state known to be persisted.
#[derive(Clone, Debug)]
pub struct ConfirmedState {
    pub table: TableSnapshot,
    pub roles: Vec<RoleAssignment>,
    pub confirmed_at: DateTime<Utc>,
}

pub struct EditingSession {
    engine: AssignmentEngine,
    roles: RoleBook,
    store: Arc<dyn BallotStore>,
    confirmed: ConfirmedState,
}

impl EditingSession {
    /// Wrap an engine and role book whose state is already persisted.
    pub fn new(engine: AssignmentEngine, roles: RoleBook, store: Arc<dyn BallotStore>) -> Self {
        let confirmed = ConfirmedState {
            table: engine.snapshot(),
            roles: roles.snapshot(),
            confirmed_at: Utc::now(),
        };
        Self {
            engine,
            roles,
            store,
            confirmed,
        }
    }

    /// Open a session on whatever the store currently holds.
    pub async fn load(
        config: ListConfig,
        roster: Roster,
        catalog: RoleCatalog,
        store: Arc<dyn BallotStore>,
    ) -> SessionResult<Self> {
        let seats = store.load_seats().await?;
        let role_records = store.load_roles().await?;

        let snapshot = TableSnapshot {
            seat_count: config.seat_count,
            assignments: seats,
        };
        let engine = AssignmentEngine::with_snapshot(config, roster, &snapshot)?;
        for record in &role_records {
            engine.roster().require(&record.member_id)?;
        }
        let roles = RoleBook::with_assignments(catalog, role_records)?;

        info!(
            list = %engine.config().name,
            filled = engine.table().filled_count(),
            "Editing session loaded"
        );
        Ok(Self::new(engine, roles, store))
    }

    pub fn engine(&self) -> &AssignmentEngine {
        &self.engine
    }

    pub fn roles(&self) -> &RoleBook {
        &self.roles
    }

    pub fn confirmed(&self) -> &ConfirmedState {
        &self.confirmed
    }

    pub fn report(&self) -> ListReport {
        ListReport::audit(&self.engine)
    }

    /// Drop-target check for the drag layer.
    pub fn is_move_allowed(&self, member: &MemberId, position: Position) -> bool {
        self.engine.is_move_allowed(member, position)
    }

    pub async fn assign(&mut self, member: &MemberId, position: Position) -> SessionResult<Vec<Change>> {
        let changes = self.engine.assign(member, position)?;
        self.commit(changes).await
    }

    pub async fn unassign(&mut self, position: Position) -> SessionResult<Vec<Change>> {
        let changes = self.engine.unassign(position)?;
        self.commit(changes).await
    }

    pub async fn swap(&mut self, a: Position, b: Position) -> SessionResult<Vec<Change>> {
        let changes = self.engine.swap(a, b)?;
        self.commit(changes).await
    }

    pub async fn set_roles(
        &mut self,
        member: &MemberId,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> SessionResult<Vec<Change>> {
        self.engine.roster().require(member)?;
        let change = self.roles.set_roles(member, roles)?;
        self.commit(vec![change]).await
    }

    pub async fn set_primary(
        &mut self,
        member: &MemberId,
        role: Option<RoleId>,
    ) -> SessionResult<Vec<Change>> {
        self.engine.roster().require(member)?;
        let changes = self.roles.set_primary(member, role)?.into_iter().collect();
        self.commit(changes).await
    }

    /// Withdraw a member: vacate their seat and drop their roles, persisted
    /// as one batch. A member with neither is left alone.
    pub async fn remove_member(&mut self, member: &MemberId) -> SessionResult<Vec<Change>> {
        let mut changes = self.engine.vacate_member(member)?;
        changes.extend(self.roles.remove_member(member));
        self.commit(changes).await
    }

    async fn commit(&mut self, changes: Vec<Change>) -> SessionResult<Vec<Change>> {
        if changes.is_empty() {
            return Ok(changes);
        }
        match self.store.apply_changes(&changes).await {
            Ok(()) => {
                self.confirmed = ConfirmedState {
                    table: self.engine.snapshot(),
                    roles: self.roles.snapshot(),
                    confirmed_at: Utc::now(),
                };
                debug!(changes = changes.len(), "Edit persisted");
                Ok(changes)
            }
            Err(err) => {
                warn!(error = %err, "Persisting edit failed, rolling back");
                self.engine.restore(&self.confirmed.table)?;
                self.roles.restore(self.confirmed.roles.clone())?;
                Err(SessionError::Persistence(err))
            }
        }
    }
}

impl std::fmt::Debug for EditingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSession")
            .field("list", &self.engine.config().name)
            .field("filled", &self.engine.table().filled_count())
            .field("confirmed_at", &self.confirmed.confirmed_at)
            .finish()
    }
}
