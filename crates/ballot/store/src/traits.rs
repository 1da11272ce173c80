use crate::StoreResult;
use async_trait::async_trait;
use ballot_types::{Assignment, Change, RoleAssignment};

/// Storage interface for one electoral list.
///
/// Implementations receive the desired state of every record an edit
/// touched and apply the batch atomically: either every change lands or
/// none does. Merging with concurrent editors (last write wins, version
/// checks) is the implementation's concern.
#[async_trait]
pub trait BallotStore: Send + Sync {
    /// Upsert or delete the records described by `changes`.
    async fn apply_changes(&self, changes: &[Change]) -> StoreResult<()>;

    /// Current seat occupancy, in seat order.
    async fn load_seats(&self) -> StoreResult<Vec<Assignment>>;

    /// Current role assignments, in member id order.
    async fn load_roles(&self) -> StoreResult<Vec<RoleAssignment>>;
}
