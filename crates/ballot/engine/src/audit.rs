//! Read-only audit of a list's current fill.

use crate::assignment::AssignmentEngine;
use ballot_types::{GenderCategory, MemberId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A seat whose occupant does not match the category the seat expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityIssue {
    pub position: Position,
    pub member_id: MemberId,
    pub expected: GenderCategory,
    pub actual: GenderCategory,
}

/// Summary of a list, for the back office overview and pre-submission
/// checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReport {
    pub seat_count: u32,
    pub filled: usize,
    pub empty_seats: Vec<Position>,
    /// Seated candidates per category.
    pub by_category: BTreeMap<GenderCategory, usize>,
    /// Only possible after loading a snapshot saved under another rule.
    pub parity_issues: Vec<ParityIssue>,
    pub unassigned_candidates: usize,
}

impl ListReport {
    pub fn audit(engine: &AssignmentEngine) -> Self {
        let mut empty_seats = Vec::new();
        let mut by_category = BTreeMap::new();
        let mut parity_issues = Vec::new();

        for (position, occupant) in engine.table().seats() {
            let Some(member) = occupant.and_then(|id| engine.roster().get(id)) else {
                empty_seats.push(position);
                continue;
            };
            *by_category.entry(member.gender.clone()).or_insert(0) += 1;
            if let Ok(Some(expected)) = engine.policy().expected_gender(position) {
                if *expected != member.gender {
                    parity_issues.push(ParityIssue {
                        position,
                        member_id: member.id.clone(),
                        expected: expected.clone(),
                        actual: member.gender.clone(),
                    });
                }
            }
        }

        Self {
            seat_count: engine.table().seat_count(),
            filled: engine.table().filled_count(),
            empty_seats,
            by_category,
            parity_issues,
            unassigned_candidates: engine.unassigned_members().len(),
        }
    }

    /// Every seat filled and no parity issue.
    pub fn is_complete(&self) -> bool {
        self.empty_seats.is_empty() && self.parity_issues.is_empty()
    }
}
