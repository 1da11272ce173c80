#[path = "property/parity_rule.rs"]
mod parity_rule;

#[path = "property/seat_invariants.rs"]
mod seat_invariants;

#[path = "property/role_invariants.rs"]
mod role_invariants;
