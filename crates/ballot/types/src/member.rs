//! Candidate members and the roster they are drawn from.

use crate::{BallotError, BallotResult, GenderCategory, MemberId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A candidate eligible for a seat on the list.
///
/// Owned by the roster store; the engine never mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Only consulted for parity evaluation.
    pub gender: GenderCategory,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: GenderCategory) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.into(),
            profession: None,
            image: None,
            gender,
        }
    }

    pub fn with_profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// The pool of candidates, in the order the roster store supplied them.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    members: Vec<Member>,
    index: HashMap<MemberId, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate ids.
    pub fn from_members(members: impl IntoIterator<Item = Member>) -> BallotResult<Self> {
        let mut roster = Self::new();
        for member in members {
            roster.insert(member)?;
        }
        Ok(roster)
    }

    pub fn insert(&mut self, member: Member) -> BallotResult<()> {
        if self.index.contains_key(&member.id) {
            return Err(BallotError::DuplicateMember(member.id));
        }
        self.index.insert(member.id.clone(), self.members.len());
        self.members.push(member);
        Ok(())
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.index.get(id).map(|&i| &self.members[i])
    }

    /// Like [`Roster::get`], but an unknown id is an error.
    pub fn require(&self, id: &MemberId) -> BallotResult<&Member> {
        self.get(id)
            .ok_or_else(|| BallotError::UnknownMember(id.clone()))
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
