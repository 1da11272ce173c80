use ballot_types::{BallotError, BallotResult, GenderCategory, ListConfig, Member, ParityConfig, Position};

/// The gender alternation rule for one list.
///
/// Describes what each seat *expects*, never what it currently holds.
#[derive(Clone, Debug)]
pub struct ParityPolicy {
    seat_count: u32,
    rule: ParityConfig,
}

impl ParityPolicy {
    pub fn new(config: &ListConfig) -> BallotResult<Self> {
        config.validate()?;
        Ok(Self {
            seat_count: config.seat_count,
            rule: config.parity.clone(),
        })
    }

    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    /// Category expected on `position`, or `None` when the seat is
    /// unconstrained.
    pub fn expected_gender(&self, position: Position) -> BallotResult<Option<&GenderCategory>> {
        self.check_range(position)?;
        if !self.rule.enabled || self.rule.unconstrained_seats.contains(&position.index()) {
            return Ok(None);
        }
        let block = (position.index() - 1) / self.rule.block_size;
        if block % 2 == 0 {
            Ok(Some(&self.rule.first_category))
        } else {
            Ok(Some(&self.rule.second_category))
        }
    }

    /// Whether a candidate of `gender` may sit on `position`.
    pub fn admits(&self, position: Position, gender: &GenderCategory) -> BallotResult<bool> {
        Ok(self
            .expected_gender(position)?
            .map_or(true, |expected| expected == gender))
    }

    /// `Ok` if `member` may sit on `position`, otherwise `ParityViolation`.
    pub fn check(&self, position: Position, member: &Member) -> BallotResult<()> {
        match self.expected_gender(position)? {
            Some(expected) if *expected != member.gender => Err(BallotError::ParityViolation {
                position,
                member: member.id.clone(),
                expected: expected.clone(),
                actual: member.gender.clone(),
            }),
            _ => Ok(()),
        }
    }

    pub fn check_range(&self, position: Position) -> BallotResult<()> {
        if position.index() == 0 || position.index() > self.seat_count {
            return Err(BallotError::InvalidPosition {
                position: position.index(),
                seat_count: self.seat_count,
            });
        }
        Ok(())
    }
}
