#![deny(unsafe_code)]
//! Ballot demo binary.
//!
//! Walks one editing session over a municipal list:
//! 1. seat candidates under the configured parity rule
//! 2. swap two seats that expect the same category, then free the last seat
//! 3. try a placement the rule refuses on that free seat
//! 4. give a candidate thematic roles and a primary role
//! 5. lose a write and watch the session roll back
//!
//! Pass a path to a JSON list configuration to override the default
//! 29-seat list. Set `RUST_LOG=debug` to see the engine's own events.

use std::sync::Arc;

use anyhow::Context;
use ballot_engine::{ListReport, ParityPolicy};
use ballot_store::{EditingSession, InMemoryBallotStore};
use ballot_types::{
    GenderCategory, ListConfig, Member, MemberId, Position, RoleCatalog, RoleId, Roster,
    ThematicRole,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── Formatting Helpers ──────────────────────────────────────────────────

fn section(title: &str) {
    println!();
    println!(" ── {} {}", title, "─".repeat(56usize.saturating_sub(title.len())));
}

fn ok(msg: &str) {
    println!("   [OK]  {}", msg);
}

fn refused(msg: &str) {
    println!("   [!!]  {}", msg);
}

fn note(msg: &str) {
    println!("   [--]  {}", msg);
}

// ── Fixtures ────────────────────────────────────────────────────────────

fn load_config() -> anyhow::Result<ListConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading list config {}", path))?;
            Ok(ListConfig::from_json_str(&json)?)
        }
        None => Ok(ListConfig::default()),
    }
}

fn candidates(seat_count: u32) -> anyhow::Result<Roster> {
    let per_side = seat_count + 1;
    let mut members = Vec::new();
    for i in 1..=per_side {
        members.push(
            Member::new(format!("f{}", i), format!("Candidate F{}", i), GenderCategory::female())
                .with_profession("Teacher"),
        );
        members.push(
            Member::new(format!("m{}", i), format!("Candidate M{}", i), GenderCategory::male())
                .with_profession("Engineer"),
        );
    }
    Ok(Roster::from_members(members)?)
}

fn catalog() -> anyhow::Result<RoleCatalog> {
    Ok(RoleCatalog::new(vec![
        ThematicRole::new("eco", "Ecology", "#2e7d32"),
        ThematicRole::new("edu", "Education", "#1565c0"),
        ThematicRole::new("cul", "Culture", "#6a1b9a")
            .with_description("Libraries, theatres and local festivals"),
    ])?)
}

/// First seat after #1 that expects the same category, so swapping the two
/// occupants keeps parity under any block size.
fn swap_partner(policy: &ParityPolicy, seat_count: u32) -> anyhow::Result<Option<Position>> {
    let first = policy.expected_gender(Position::new(1))?;
    for seat in 2..=seat_count {
        let position = Position::new(seat);
        if policy.expected_gender(position)? == first {
            return Ok(Some(position));
        }
    }
    Ok(None)
}

fn print_report(report: &ListReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

// ── Main ────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = load_config()?;
    let seat_count = config.seat_count;
    info!(list = %config.name, seats = seat_count, "Starting demo");

    let store = Arc::new(InMemoryBallotStore::new());
    let mut session =
        EditingSession::load(config, candidates(seat_count)?, catalog()?, store.clone()).await?;

    section("Seating");
    let policy = session.engine().policy().clone();
    let (mut f, mut m) = (0, 0);
    for seat in 1..=seat_count {
        let position = Position::new(seat);
        let expected = policy
            .expected_gender(position)?
            .cloned()
            .unwrap_or_else(|| match position.is_odd() {
                true => GenderCategory::female(),
                false => GenderCategory::male(),
            });
        let member = match expected == GenderCategory::male() {
            true => {
                m += 1;
                MemberId::new(format!("m{}", m))
            }
            false => {
                f += 1;
                MemberId::new(format!("f{}", f))
            }
        };
        session.assign(&member, position).await?;
    }
    ok(&format!("{} seats filled", session.engine().table().filled_count()));

    section("Rearranging");
    let first = Position::new(1);
    let partner = swap_partner(&policy, seat_count)?;
    match partner {
        Some(partner) => {
            session.swap(first, partner).await?;
            ok(&format!("Seats {} and {} swapped", first, partner));
        }
        None => note("No seat shares seat #1's category, nothing to swap"),
    }
    let last = Position::new(seat_count);
    session.unassign(last).await?;
    ok(&format!("{} emptied", last));

    section("Parity");
    let mismatched = session
        .engine()
        .unassigned_members()
        .into_iter()
        .find(|candidate| matches!(policy.admits(last, &candidate.gender), Ok(false)))
        .map(|candidate| candidate.id.clone());
    match mismatched {
        Some(candidate) => match session.assign(&candidate, last).await {
            Ok(_) => ok(&format!("{} placed on {}", candidate, last)),
            Err(err) => refused(&format!("{} on {}: {}", candidate, last, err)),
        },
        None => note(&format!("{} carries no gender expectation", last)),
    }
    let spare = session
        .engine()
        .unassigned_members()
        .into_iter()
        .find(|candidate| session.is_move_allowed(&candidate.id, last))
        .map(|candidate| candidate.id.clone());
    if let Some(spare) = spare {
        session.assign(&spare, last).await?;
        ok(&format!("{} placed on {}", spare, last));
    }

    section("Thematic roles");
    let lead = MemberId::new("f1");
    session
        .set_roles(&lead, vec![RoleId::new("eco"), RoleId::new("edu")])
        .await?;
    session.set_primary(&lead, Some(RoleId::new("eco"))).await?;
    ok(&format!("{} leads on ecology", lead));
    session
        .set_roles(&lead, vec![RoleId::new("edu"), RoleId::new("cul")])
        .await?;
    match session.roles().primary_of(&lead) {
        Some(primary) => ok(&format!("Primary role still {}", primary)),
        None => refused("Primary role dropped with ecology, designate a new one"),
    }
    session.set_primary(&lead, Some(RoleId::new("cul"))).await?;
    ok(&format!("{} now leads on culture", lead));

    section("Storage failure");
    if let Some(partner) = partner {
        store.fail_next_writes(1);
        match session.swap(first, partner).await {
            Ok(_) => ok("Swap persisted"),
            Err(err) => refused(&format!("{}", err)),
        }
        ok(&format!(
            "Seat {} still held by {}",
            first,
            session
                .engine()
                .table()
                .occupant(first)?
                .map(|id| id.to_string())
                .unwrap_or_else(|| "nobody".to_string())
        ));
    }

    section("Report");
    print_report(&session.report())?;
    ok(&format!("{} batches written", store.batches_applied()));
    Ok(())
}
