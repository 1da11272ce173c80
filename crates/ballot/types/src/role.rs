//! Thematic roles: the catalog and per-member role assignments.

use crate::{BallotError, BallotResult, MemberId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named, colored category shown on the public team page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThematicRole {
    pub id: RoleId,
    pub name: String,
    /// CSS color, e.g. `#2e7d32`.
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ThematicRole {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: RoleId::new(id),
            name: name.into(),
            color: color.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The fixed catalog of roles, supplied externally.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoleCatalog {
    roles: Vec<ThematicRole>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<ThematicRole>) -> BallotResult<Self> {
        let mut seen = BTreeSet::new();
        for role in &roles {
            if !seen.insert(&role.id) {
                return Err(BallotError::InvalidConfig(format!(
                    "duplicate role in catalog: {}",
                    role.id
                )));
            }
        }
        Ok(Self { roles })
    }

    pub fn get(&self, id: &RoleId) -> Option<&ThematicRole> {
        self.roles.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RoleId) -> bool {
        self.get(id).is_some()
    }

    pub fn require(&self, id: &RoleId) -> BallotResult<&ThematicRole> {
        self.get(id)
            .ok_or_else(|| BallotError::UnknownRole(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThematicRole> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Roles held by one member, with at most one designated primary.
///
/// Invariant: `primary`, when set, is an element of `roles`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub member_id: MemberId,
    pub roles: BTreeSet<RoleId>,
    pub primary: Option<RoleId>,
}

impl RoleAssignment {
    pub fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            roles: BTreeSet::new(),
            primary: None,
        }
    }

    pub fn holds(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    pub fn is_consistent(&self) -> bool {
        self.primary.as_ref().map_or(true, |p| self.roles.contains(p))
    }
}
