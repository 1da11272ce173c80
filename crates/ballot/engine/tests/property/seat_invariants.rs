//! Property tests: random edit sequences never break seat uniqueness or
//! parity, and rejected edits never leave a trace.

use ballot_engine::{AssignmentEngine, ListReport};
use ballot_types::{Change, GenderCategory, ListConfig, Member, MemberId, Position, Roster};
use proptest::prelude::*;
use std::collections::HashSet;

const SEATS: u32 = 8;
const CANDIDATES: usize = 7;

#[derive(Debug, Clone)]
enum Op {
    Assign(usize, u32),
    Unassign(u32),
    Swap(u32, u32),
}

fn roster() -> Roster {
    Roster::from_members((0..CANDIDATES).map(|i| {
        let gender = if i % 2 == 0 {
            GenderCategory::female()
        } else {
            GenderCategory::male()
        };
        Member::new(format!("c{}", i), format!("Candidate {}", i), gender)
    }))
    .unwrap()
}

fn member(i: usize) -> MemberId {
    MemberId::new(format!("c{}", i))
}

/// Seats include 0 and N+1 so out-of-range handling is exercised too.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..CANDIDATES, 0..=SEATS + 1).prop_map(|(m, p)| Op::Assign(m, p)),
        1 => (0..=SEATS + 1).prop_map(Op::Unassign),
        2 => (0..=SEATS + 1, 0..=SEATS + 1).prop_map(|(a, b)| Op::Swap(a, b)),
    ]
}

fn assert_invariants(engine: &AssignmentEngine) -> Result<(), TestCaseError> {
    prop_assert!(engine.table().is_consistent());

    let mut seen = HashSet::new();
    for (_, occupant) in engine.table().seats() {
        if let Some(id) = occupant {
            prop_assert!(seen.insert(id.clone()), "{} seated twice", id);
        }
    }
    prop_assert!(ListReport::audit(engine).parity_issues.is_empty());
    Ok(())
}

proptest! {
    #[test]
    fn edits_preserve_invariants(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut engine = AssignmentEngine::new(ListConfig::new("prop", SEATS), roster()).unwrap();

        for op in ops {
            let before = engine.snapshot();
            let result = match &op {
                Op::Assign(m, p) => {
                    let allowed = engine.is_move_allowed(&member(*m), Position::new(*p));
                    prop_assert_eq!(engine.snapshot(), before.clone());
                    let result = engine.assign(&member(*m), Position::new(*p));
                    prop_assert_eq!(allowed, result.is_ok());
                    if result.is_ok() {
                        prop_assert_eq!(engine.position_of(&member(*m)), Some(Position::new(*p)));
                    }
                    result
                }
                Op::Unassign(p) => {
                    let result = engine.unassign(Position::new(*p));
                    if result.is_ok() {
                        prop_assert!(engine.table().occupant(Position::new(*p)).unwrap().is_none());
                    }
                    result
                }
                Op::Swap(a, b) => {
                    let at_a = before.occupant(Position::new(*a)).cloned();
                    let at_b = before.occupant(Position::new(*b)).cloned();
                    let result = engine.swap(Position::new(*a), Position::new(*b));
                    if result.is_ok() {
                        prop_assert_eq!(engine.table().occupant(Position::new(*a)).unwrap().cloned(), at_b);
                        prop_assert_eq!(engine.table().occupant(Position::new(*b)).unwrap().cloned(), at_a);
                    }
                    result
                }
            };

            if let Err(err) = result {
                prop_assert_eq!(engine.snapshot(), before, "{:?} rejected with {} but mutated", op, err);
            }
            assert_invariants(&engine)?;
        }
    }

    /// Each accepted edit reports exactly the seats whose occupant changed.
    #[test]
    fn changes_describe_new_state(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut engine = AssignmentEngine::new(ListConfig::new("prop", SEATS), roster()).unwrap();

        for op in ops {
            let before = engine.snapshot();
            let result = match op {
                Op::Assign(m, p) => engine.assign(&member(m), Position::new(p)),
                Op::Unassign(p) => engine.unassign(Position::new(p)),
                Op::Swap(a, b) => engine.swap(Position::new(a), Position::new(b)),
            };
            let Ok(changes) = result else { continue };

            for change in &changes {
                let Change::Seat(record) = change else {
                    return Err(TestCaseError::fail("seat edit produced a non-seat change"));
                };
                prop_assert_eq!(
                    engine.table().occupant(record.position).unwrap(),
                    record.member_id.as_ref()
                );
            }
            for seat in 1..=SEATS {
                let position = Position::new(seat);
                let touched = changes.iter().any(|c| matches!(c, Change::Seat(r) if r.position == position));
                if !touched {
                    prop_assert_eq!(
                        engine.table().occupant(position).unwrap(),
                        before.occupant(position)
                    );
                }
            }
        }
    }
}
