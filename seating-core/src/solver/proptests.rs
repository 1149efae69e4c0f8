//! Property tests for the invariants spec'd as proptest-worthy: permutation
//! validity, sub-score bounds, fitness-history and elitism monotonicity, and
//! the neutral-score contract on empty categories.

use crate::attendees::AttendeeIndex;
use crate::models::{Attendee, AttendeeType, Mode, OptimizerConfig, Preference, Weights};
use crate::solver::construction::random_assignment;
use crate::solver::driver;
use crate::solver::scoring::fitness;
use crate::venue::Venue;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;

fn arb_attendee() -> impl Strategy<Value = Attendee> {
    (
        prop_oneof![Just(AttendeeType::Vip), Just(AttendeeType::Regular)],
        prop::option::of("[a-c]"),
        prop_oneof![
            Just(Preference::Any),
            Just(Preference::Front),
            Just(Preference::Middle),
            Just(Preference::Back),
        ],
        1u8..=10,
    )
        .prop_map(|(kind, group, preference, priority)| Attendee {
            id: None,
            kind,
            group,
            preference,
            priority,
        })
}

fn arb_problem() -> impl Strategy<Value = (usize, usize, usize, Vec<Attendee>)> {
    (2usize..=5, 2usize..=5, 0usize..=2).prop_flat_map(|(rows, cols, vip_rows)| {
        let vip_rows = vip_rows.min(rows);
        let capacity = rows * cols;
        (1usize..=capacity).prop_flat_map(move |n| {
            prop::collection::vec(arb_attendee(), n)
                .prop_map(move |attendees| (rows, cols, vip_rows, attendees))
        })
    })
}

proptest! {
    // Invariant 1: every assignment produced by random_assignment is a
    // permutation of n distinct seat positions.
    #[test]
    fn random_assignment_is_always_a_valid_permutation((rows, cols, vip_rows, attendees) in arb_problem()) {
        let venue = Venue::build(rows, cols, vip_rows).unwrap();
        let n = attendees.len();
        let mut rng = SmallRng::seed_from_u64(n as u64 + 1);
        let assignment = random_assignment(&venue, n, &mut rng);

        prop_assert_eq!(assignment.len(), n);
        let set: HashSet<_> = assignment.iter().collect();
        prop_assert_eq!(set.len(), n);
        prop_assert!(assignment.iter().all(|&pos| pos < venue.capacity()));
    }

    // Invariant 2: all four sub-scores and the total fall in [0, 1].
    #[test]
    fn fitness_sub_scores_stay_within_unit_interval((rows, cols, vip_rows, attendees) in arb_problem()) {
        let venue = Venue::build(rows, cols, vip_rows).unwrap();
        let n = attendees.len();
        let idx = AttendeeIndex::build(attendees).unwrap();
        let mut rng = SmallRng::seed_from_u64(n as u64 + 2);
        let assignment = random_assignment(&venue, n, &mut rng);
        let record = fitness(&assignment, &venue, &idx, &Weights::default()).unwrap();

        prop_assert!((0.0..=1.0).contains(&record.friend_proximity));
        prop_assert!((0.0..=1.0).contains(&record.vip_placement));
        prop_assert!((0.0..=1.0).contains(&record.group_cohesion));
        prop_assert!((0.0..=1.0).contains(&record.stage_distance));
        prop_assert!((0.0..=1.0).contains(&record.total));
    }

    // Invariant 5: with no friendships (no shared groups) or no VIPs, the
    // corresponding sub-score is the neutral value 1.0.
    #[test]
    fn neutral_score_is_exactly_one_on_an_empty_category(rows in 2usize..=4, cols in 2usize..=4, n in 1usize..=8) {
        let n = n.min(rows * cols);
        let venue = Venue::build(rows, cols, 0).unwrap();
        let attendees: Vec<Attendee> = (0..n)
            .map(|_| Attendee {
                id: None,
                kind: AttendeeType::Regular,
                group: None,
                preference: Preference::Any,
                priority: 5,
            })
            .collect();
        let idx = AttendeeIndex::build(attendees).unwrap();
        let mut rng = SmallRng::seed_from_u64(n as u64 + 3);
        let assignment = random_assignment(&venue, n, &mut rng);
        let record = fitness(&assignment, &venue, &idx, &Weights::default()).unwrap();

        prop_assert_eq!(record.friend_proximity, 1.0);
        prop_assert_eq!(record.vip_placement, 1.0);
        prop_assert_eq!(record.group_cohesion, 1.0);
    }

    // Invariant 3: the per-generation best-fitness history the driver
    // returns is non-decreasing.
    #[test]
    fn driver_history_is_monotonically_non_decreasing(seed in 0u64..200) {
        let venue = Venue::build(4, 4, 1).unwrap();
        let attendees: Vec<Attendee> = (0..6)
            .map(|i| Attendee {
                id: None,
                kind: if i == 0 { AttendeeType::Vip } else { AttendeeType::Regular },
                group: if i % 2 == 0 { Some("g".to_string()) } else { None },
                preference: Preference::Any,
                priority: 5,
            })
            .collect();
        let idx = AttendeeIndex::build(attendees).unwrap();
        let config = OptimizerConfig {
            population_size: 12,
            generations: 8,
            mode: Mode::Fast,
            tournament_size: 3,
            elitism_count: 2,
            ..Default::default()
        };
        let cancel = AtomicBool::new(false);
        let mut rng = SmallRng::seed_from_u64(seed);

        let result = driver::run(&venue, &idx, &config, &cancel, None, None, &mut rng).unwrap();
        for w in result.history.windows(2) {
            prop_assert!(w[1] + 1e-9 >= w[0]);
        }
    }

    // Invariant 4: elitism never lets the tracked global best regress
    // generation over generation, for any elitism_count in range.
    #[test]
    fn elitism_never_lets_global_best_regress(seed in 0u64..200, elitism_count in 0u32..6) {
        let venue = Venue::build(4, 4, 0).unwrap();
        let attendees: Vec<Attendee> = (0..6)
            .map(|_| Attendee {
                id: None,
                kind: AttendeeType::Regular,
                group: None,
                preference: Preference::Any,
                priority: 5,
            })
            .collect();
        let idx = AttendeeIndex::build(attendees).unwrap();
        let config = OptimizerConfig {
            population_size: 10,
            generations: 6,
            mode: Mode::Fast,
            tournament_size: 3,
            elitism_count,
            ..Default::default()
        };
        let cancel = AtomicBool::new(false);
        let mut rng = SmallRng::seed_from_u64(seed);

        let result = driver::run(&venue, &idx, &config, &cancel, None, None, &mut rng).unwrap();
        let mut best_so_far = f64::MIN;
        for &total in &result.history {
            prop_assert!(total + 1e-9 >= best_so_far);
            best_so_far = total;
        }
    }
}
