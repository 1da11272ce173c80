use crate::{BallotError, BallotResult, GenderCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Seat count of a municipal list in the reference deployment.
pub const DEFAULT_SEAT_COUNT: u32 = 29;

/// Largest seat count a configuration may declare.
pub const MAX_SEAT_COUNT: u32 = 1_000;

/// Configuration of one electoral list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Display name of the list.
    pub name: String,
    /// Number of seats, numbered `1..=seat_count`.
    pub seat_count: u32,
    /// Gender alternation rule.
    pub parity: ParityConfig,
}

/// Gender alternation rule applied to seat indices.
///
/// Seats are grouped in consecutive blocks of `block_size`; the first block
/// expects `first_category`, the next `second_category`, and so on. A block
/// size of 1 is strict zipper alternation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityConfig {
    /// When false every seat is unconstrained.
    pub enabled: bool,
    /// Category expected on seat 1.
    pub first_category: GenderCategory,
    /// The alternate category.
    pub second_category: GenderCategory,
    pub block_size: u32,
    /// Seats exempt from the rule.
    pub unconstrained_seats: BTreeSet<u32>,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            first_category: GenderCategory::female(),
            second_category: GenderCategory::male(),
            block_size: 1,
            unconstrained_seats: BTreeSet::new(),
        }
    }
}

impl ParityConfig {
    /// Strict zipper alternation starting with `first`.
    pub fn zipper(first: GenderCategory, second: GenderCategory) -> Self {
        Self {
            first_category: first,
            second_category: second,
            ..Self::default()
        }
    }

    /// No seat carries a gender expectation.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_unconstrained_seat(mut self, seat: u32) -> Self {
        self.unconstrained_seats.insert(seat);
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            name: "Liste municipale".into(),
            seat_count: DEFAULT_SEAT_COUNT,
            parity: ParityConfig::default(),
        }
    }
}

impl ListConfig {
    pub fn new(name: impl Into<String>, seat_count: u32) -> Self {
        Self {
            name: name.into(),
            seat_count,
            parity: ParityConfig::default(),
        }
    }

    pub fn with_parity(mut self, parity: ParityConfig) -> Self {
        self.parity = parity;
        self
    }

    /// Parse and validate a configuration from JSON. Missing fields take
    /// their defaults.
    pub fn from_json_str(json: &str) -> BallotResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BallotError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BallotResult<()> {
        if self.seat_count == 0 {
            return Err(BallotError::InvalidConfig("seat_count must be at least 1".into()));
        }
        if self.seat_count > MAX_SEAT_COUNT {
            return Err(BallotError::InvalidConfig(format!(
                "seat_count {} exceeds the maximum of {}",
                self.seat_count, MAX_SEAT_COUNT
            )));
        }
        let parity = &self.parity;
        if parity.block_size == 0 {
            return Err(BallotError::InvalidConfig("parity block_size must be at least 1".into()));
        }
        if parity.enabled && parity.first_category == parity.second_category {
            return Err(BallotError::InvalidConfig(format!(
                "parity categories must differ (both are {})",
                parity.first_category
            )));
        }
        if let Some(seat) = parity
            .unconstrained_seats
            .iter()
            .find(|&&s| s == 0 || s > self.seat_count)
        {
            return Err(BallotError::InvalidConfig(format!(
                "unconstrained seat {} outside 1..={}",
                seat, self.seat_count
            )));
        }
        Ok(())
    }
}
