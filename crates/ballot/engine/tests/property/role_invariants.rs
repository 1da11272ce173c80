//! Property tests: the primary role is always one of the held roles.

use ballot_engine::RoleBook;
use ballot_types::{MemberId, RoleCatalog, RoleId, ThematicRole};
use proptest::prelude::*;

const ROLES: [&str; 4] = ["ecology", "education", "culture", "mobility"];
const MEMBERS: usize = 3;

#[derive(Debug, Clone)]
enum RoleOp {
    SetRoles(usize, Vec<usize>),
    SetPrimary(usize, Option<usize>),
    Remove(usize),
}

fn catalog() -> RoleCatalog {
    RoleCatalog::new(
        ROLES
            .iter()
            .map(|id| ThematicRole::new(*id, id.to_uppercase(), "#000000"))
            .collect(),
    )
    .unwrap()
}

fn member(i: usize) -> MemberId {
    MemberId::new(format!("m{}", i))
}

fn role(i: usize) -> RoleId {
    RoleId::new(ROLES[i])
}

fn arb_op() -> impl Strategy<Value = RoleOp> {
    prop_oneof![
        3 => (0..MEMBERS, prop::collection::vec(0..ROLES.len(), 0..4))
            .prop_map(|(m, roles)| RoleOp::SetRoles(m, roles)),
        3 => (0..MEMBERS, prop::option::of(0..ROLES.len()))
            .prop_map(|(m, r)| RoleOp::SetPrimary(m, r)),
        1 => (0..MEMBERS).prop_map(RoleOp::Remove),
    ]
}

proptest! {
    #[test]
    fn primary_always_held(ops in prop::collection::vec(arb_op(), 0..50)) {
        let mut book = RoleBook::new(catalog());

        for op in ops {
            match op {
                RoleOp::SetRoles(m, roles) => {
                    let previous = book.primary_of(&member(m)).cloned();
                    let wanted: Vec<RoleId> = roles.iter().map(|&r| role(r)).collect();
                    book.set_roles(&member(m), wanted.clone()).unwrap();

                    match book.roles_of(&member(m)) {
                        Some(held) => {
                            prop_assert!(wanted.iter().all(|r| held.holds(r)));
                            prop_assert_eq!(held.roles.len(), {
                                let mut unique = wanted.clone();
                                unique.sort();
                                unique.dedup();
                                unique.len()
                            });
                            // A kept primary survives; a dropped one is cleared.
                            let expected = previous.filter(|p| held.holds(p));
                            prop_assert_eq!(held.primary.clone(), expected);
                        }
                        None => {
                            prop_assert!(wanted.is_empty());
                        }
                    }
                }
                RoleOp::SetPrimary(m, r) => {
                    let held = book.roles_of(&member(m)).map(|a| a.roles.clone()).unwrap_or_default();
                    let before = book.primary_of(&member(m)).cloned();
                    let result = book.set_primary(&member(m), r.map(role));
                    match r {
                        Some(r) if !held.contains(&role(r)) => {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(book.primary_of(&member(m)).cloned(), before);
                        }
                        Some(r) => {
                            let expected = role(r);
                            prop_assert_eq!(book.primary_of(&member(m)), Some(&expected));
                        }
                        None => {
                            prop_assert_eq!(book.primary_of(&member(m)), None);
                        }
                    }
                }
                RoleOp::Remove(m) => {
                    book.remove_member(&member(m));
                    prop_assert!(book.roles_of(&member(m)).is_none());
                }
            }
            prop_assert!(book.is_consistent());
        }
    }
}
