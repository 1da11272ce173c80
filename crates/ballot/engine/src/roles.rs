use ballot_types::{
    BallotError, BallotResult, Change, MemberId, RoleAssignment, RoleCatalog, RoleId,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Per-member thematic roles with a single optional primary.
///
/// Invariant after every mutation: each member's primary role, when set, is
/// one of the roles they hold. Members holding no role have no entry.
#[derive(Clone, Debug, Default)]
pub struct RoleBook {
    catalog: RoleCatalog,
    assignments: BTreeMap<MemberId, RoleAssignment>,
}

impl RoleBook {
    pub fn new(catalog: RoleCatalog) -> Self {
        Self {
            catalog,
            assignments: BTreeMap::new(),
        }
    }

    /// Load stored assignments, validating each against the catalog and the
    /// primary invariant.
    pub fn with_assignments(
        catalog: RoleCatalog,
        assignments: impl IntoIterator<Item = RoleAssignment>,
    ) -> BallotResult<Self> {
        let mut book = Self::new(catalog);
        book.restore(assignments)?;
        Ok(book)
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn roles_of(&self, member: &MemberId) -> Option<&RoleAssignment> {
        self.assignments.get(member)
    }

    pub fn primary_of(&self, member: &MemberId) -> Option<&RoleId> {
        self.assignments.get(member).and_then(|a| a.primary.as_ref())
    }

    /// Members holding `role`, in id order.
    pub fn members_with_role(&self, role: &RoleId) -> Vec<&MemberId> {
        self.assignments
            .values()
            .filter(|a| a.holds(role))
            .map(|a| &a.member_id)
            .collect()
    }

    /// Replace the roles `member` holds.
    ///
    /// A primary that is no longer held is cleared. No primary is ever
    /// chosen on the caller's behalf. An empty set removes the member's
    /// entry entirely.
    pub fn set_roles(
        &mut self,
        member: &MemberId,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> BallotResult<Change> {
        let roles: BTreeSet<RoleId> = roles.into_iter().collect();
        for role in &roles {
            self.catalog.require(role)?;
        }

        if roles.is_empty() {
            self.assignments.remove(member);
            debug!(member = %member, "Roles cleared");
            return Ok(Change::RolesCleared {
                member_id: member.clone(),
            });
        }

        let entry = self
            .assignments
            .entry(member.clone())
            .or_insert_with(|| RoleAssignment::new(member.clone()));
        entry.roles = roles;
        if entry.primary.as_ref().is_some_and(|p| !entry.roles.contains(p)) {
            debug!(member = %member, "Primary role dropped with its role");
            entry.primary = None;
        }
        debug!(member = %member, held = entry.roles.len(), "Roles replaced");
        Ok(Change::Roles(entry.clone()))
    }

    /// Designate `role` as the member's primary, or clear it with `None`.
    ///
    /// Clearing the primary of a member with no roles changes nothing and
    /// yields no change record.
    pub fn set_primary(
        &mut self,
        member: &MemberId,
        role: Option<RoleId>,
    ) -> BallotResult<Option<Change>> {
        let Some(role) = role else {
            return Ok(self.assignments.get_mut(member).map(|entry| {
                entry.primary = None;
                Change::Roles(entry.clone())
            }));
        };

        self.catalog.require(&role)?;
        match self.assignments.get_mut(member) {
            Some(entry) if entry.holds(&role) => {
                debug!(member = %member, role = %role, "Primary role set");
                entry.primary = Some(role);
                Ok(Some(Change::Roles(entry.clone())))
            }
            _ => {
                warn!(member = %member, role = %role, "Primary role not held");
                Err(BallotError::RoleNotHeld {
                    member: member.clone(),
                    role,
                })
            }
        }
    }

    /// Forget everything about `member`. Used when the member is withdrawn.
    ///
    /// `None` when the member held no roles.
    pub fn remove_member(&mut self, member: &MemberId) -> Option<Change> {
        self.assignments
            .remove(member)
            .map(|_| Change::RolesCleared {
                member_id: member.clone(),
            })
    }

    /// All assignments, in member id order.
    pub fn snapshot(&self) -> Vec<RoleAssignment> {
        self.assignments.values().cloned().collect()
    }

    /// Replace every assignment. On error the book is left unchanged.
    pub fn restore(
        &mut self,
        assignments: impl IntoIterator<Item = RoleAssignment>,
    ) -> BallotResult<()> {
        let mut loaded = BTreeMap::new();
        for assignment in assignments {
            for role in &assignment.roles {
                self.catalog.require(role)?;
            }
            if let Some(primary) = assignment
                .primary
                .as_ref()
                .filter(|p| !assignment.roles.contains(*p))
            {
                return Err(BallotError::RoleNotHeld {
                    member: assignment.member_id.clone(),
                    role: primary.clone(),
                });
            }
            if assignment.roles.is_empty() {
                continue;
            }
            if loaded.contains_key(&assignment.member_id) {
                return Err(BallotError::DuplicateMember(assignment.member_id));
            }
            loaded.insert(assignment.member_id.clone(), assignment);
        }
        self.assignments = loaded;
        Ok(())
    }

    pub fn is_consistent(&self) -> bool {
        self.assignments
            .values()
            .all(|a| a.is_consistent() && !a.roles.is_empty())
    }
}
