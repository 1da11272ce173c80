//! Property tests: the parity rule is a pure function of the seat index.

use ballot_engine::ParityPolicy;
use ballot_types::{GenderCategory, ListConfig, ParityConfig, Position};
use proptest::prelude::*;

fn arb_first_category() -> impl Strategy<Value = (GenderCategory, GenderCategory)> {
    prop_oneof![
        Just((GenderCategory::female(), GenderCategory::male())),
        Just((GenderCategory::male(), GenderCategory::female())),
    ]
}

proptest! {
    /// With block size 1, consecutive seats always expect different categories.
    #[test]
    fn zipper_alternates_strictly(
        seat_count in 2u32..80,
        (first, second) in arb_first_category(),
    ) {
        let config = ListConfig::new("prop", seat_count)
            .with_parity(ParityConfig::zipper(first.clone(), second));
        let policy = ParityPolicy::new(&config).unwrap();

        prop_assert_eq!(policy.expected_gender(Position::new(1)).unwrap(), Some(&first));
        for seat in 1..seat_count {
            let here = policy.expected_gender(Position::new(seat)).unwrap();
            let next = policy.expected_gender(Position::new(seat + 1)).unwrap();
            prop_assert!(here.is_some() && next.is_some());
            prop_assert_ne!(here, next);
        }
    }

    /// Repeated queries give the same answer, and only `1..=N` is accepted.
    #[test]
    fn expected_gender_is_deterministic_and_total(
        seat_count in 1u32..60,
        block_size in 1u32..5,
        probe in 0u32..80,
    ) {
        let config = ListConfig::new("prop", seat_count)
            .with_parity(ParityConfig::default().with_block_size(block_size));
        let policy = ParityPolicy::new(&config).unwrap();

        let a = policy.expected_gender(Position::new(probe));
        let b = policy.expected_gender(Position::new(probe));
        prop_assert_eq!(a.is_ok(), (1..=seat_count).contains(&probe));
        prop_assert_eq!(a, b);
    }

    /// Seats within one block share a category; adjacent blocks differ.
    #[test]
    fn block_alternation(block_size in 1u32..6, blocks in 2u32..6) {
        let seat_count = block_size * blocks;
        let config = ListConfig::new("prop", seat_count)
            .with_parity(ParityConfig::default().with_block_size(block_size));
        let policy = ParityPolicy::new(&config).unwrap();

        for seat in 1..seat_count {
            let here = policy.expected_gender(Position::new(seat)).unwrap();
            let next = policy.expected_gender(Position::new(seat + 1)).unwrap();
            let crosses_block = seat % block_size == 0;
            prop_assert_eq!(here != next, crosses_block);
        }
    }
}
