//! Fitness evaluator (C3): the pure function mapping an assignment to its
//! four normalized sub-scores and their weighted total.

use crate::attendees::AttendeeIndex;
use crate::models::{Assignment, AttendeeType, FitnessRecord, SeatingError, Weights};
use crate::venue::Venue;

/// Computes the fitness record for `assignment` against `venue` and the
/// preprocessed attendee `idx`, using `weights` to combine the four
/// sub-scores. Deterministic: depends only on its arguments, no RNG.
///
/// Returns `SeatingError::Weight` if all four weights are zero (the weighted
/// total would be undefined).
pub fn fitness(
    assignment: &Assignment,
    venue: &Venue,
    idx: &AttendeeIndex,
    weights: &Weights,
) -> Result<FitnessRecord, SeatingError> {
    weights.validate()?;

    let friend_proximity = friend_proximity_score(assignment, venue, idx);
    let vip_placement = vip_placement_score(assignment, venue, idx);
    let stage_distance = stage_distance_score(assignment, venue, idx);
    let group_cohesion = group_cohesion_score(assignment, venue, idx);

    let weight_sum = weights.sum();
    let total = (friend_proximity * weights.friend
        + vip_placement * weights.vip
        + group_cohesion * weights.group
        + stage_distance * weights.distance)
        / weight_sum;

    Ok(FitnessRecord {
        friend_proximity,
        vip_placement,
        group_cohesion,
        stage_distance,
        total,
    })
}

/// Raw-per-pair friend-proximity scoring curve.
fn friend_pair_score(d: usize) -> f64 {
    if d == 1 {
        10.0
    } else if d == 2 {
        7.0
    } else if d <= 4 {
        4.0
    } else {
        (2.0 - 0.1 * d as f64).max(0.0)
    }
}

fn friend_proximity_score(assignment: &Assignment, venue: &Venue, idx: &AttendeeIndex) -> f64 {
    let mut raw = 0.0;
    let mut max = 0.0;
    for (&i, friends) in &idx.friendships {
        for &j in friends {
            let d = venue.manhattan(assignment[i], assignment[j]);
            raw += friend_pair_score(d);
            max += 10.0;
        }
    }
    if max == 0.0 {
        1.0
    } else {
        raw / max
    }
}

fn vip_placement_score(assignment: &Assignment, venue: &Venue, idx: &AttendeeIndex) -> f64 {
    let mut raw = 0.0;
    let mut max = 0.0;
    for (i, attendee) in idx.attendees.iter().enumerate() {
        if attendee.kind != AttendeeType::Vip {
            continue;
        }
        let seat = venue.seat(assignment[i]);
        raw += if seat.is_vip {
            20.0
        } else {
            (10.0 - 2.0 * seat.row as f64).max(0.0)
        };
        max += 20.0;
    }
    if max == 0.0 {
        1.0
    } else {
        raw / max
    }
}

fn stage_distance_score(assignment: &Assignment, venue: &Venue, idx: &AttendeeIndex) -> f64 {
    let mut raw = 0.0;
    let mut max = 0.0;
    for (i, attendee) in idx.attendees.iter().enumerate() {
        let p = attendee.priority as f64 / 10.0;
        let cap = 10.0 * p;
        let seat = venue.seat(assignment[i]);
        let contribution = ((1.0 - seat.distance_to_stage / venue.max_venue_distance) * cap).max(0.0);
        raw += contribution;
        max += cap;
    }
    if max == 0.0 {
        1.0
    } else {
        raw / max
    }
}

fn group_cohesion_score(assignment: &Assignment, venue: &Venue, idx: &AttendeeIndex) -> f64 {
    let mut raw = 0.0;
    let mut max = 0.0;
    for members in idx.groups.values() {
        let m = members.len();
        if m < 2 {
            continue;
        }
        let mut points = 0.0;
        for a in 0..members.len() {
            for b in (a + 1)..members.len() {
                let d = venue.manhattan(assignment[members[a]], assignment[members[b]]);
                if d == 1 {
                    points += 2.0;
                } else if d == 2 {
                    points += 1.0;
                }
            }
        }
        let normalizer = ((m - 1) * 2) as f64;
        let group_max = 10.0 * m as f64;
        raw += (points / normalizer.max(1.0) * group_max).min(group_max);
        max += group_max;
    }
    if max == 0.0 {
        1.0
    } else {
        raw / max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendees::AttendeeIndex;
    use crate::models::{Attendee, AttendeeType, Preference};
    use crate::venue::Venue;

    fn regular() -> Attendee {
        Attendee {
            id: None,
            kind: AttendeeType::Regular,
            group: None,
            preference: Preference::Any,
            priority: 5,
        }
    }

    #[test]
    fn neutral_scores_when_categories_empty() {
        let venue = Venue::build(4, 4, 0).unwrap();
        let idx = AttendeeIndex::build(vec![regular(), regular()]).unwrap();
        let assignment = vec![0, 1];
        let record = fitness(&assignment, &venue, &idx, &Weights::default()).unwrap();
        assert_eq!(record.friend_proximity, 1.0);
        assert_eq!(record.vip_placement, 1.0);
        assert_eq!(record.group_cohesion, 1.0);
        assert!(record.stage_distance >= 0.0 && record.stage_distance <= 1.0);
    }

    #[test]
    fn all_zero_weights_is_error() {
        let venue = Venue::build(2, 2, 0).unwrap();
        let idx = AttendeeIndex::build(vec![regular()]).unwrap();
        let weights = Weights {
            friend: 0.0,
            vip: 0.0,
            group: 0.0,
            distance: 0.0,
        };
        let err = fitness(&vec![0], &venue, &idx, &weights).unwrap_err();
        assert!(matches!(err, SeatingError::Weight(_)));
    }

    #[test]
    fn vip_in_vip_seat_scores_full() {
        let venue = Venue::build(3, 3, 1).unwrap();
        let vip = Attendee {
            kind: AttendeeType::Vip,
            ..regular()
        };
        let idx = AttendeeIndex::build(vec![vip]).unwrap();
        // seat 0 is row 0 -> vip seat
        let record = fitness(&vec![0], &venue, &idx, &Weights::default()).unwrap();
        assert_eq!(record.vip_placement, 1.0);
    }

    #[test]
    fn friend_adjacent_scores_full() {
        let venue = Venue::build(2, 2, 0).unwrap();
        let a = Attendee {
            group: Some("g".to_string()),
            ..regular()
        };
        let b = a.clone();
        let idx = AttendeeIndex::build(vec![a, b]).unwrap();
        // seats 0 (0,0) and 1 (0,1): manhattan distance 1
        let record = fitness(&vec![0, 1], &venue, &idx, &Weights::default()).unwrap();
        assert_eq!(record.friend_proximity, 1.0);
    }

    #[test]
    fn sub_scores_bounded_in_unit_interval() {
        let venue = Venue::build(4, 4, 1).unwrap();
        let mut attendees = vec![];
        for i in 0..6 {
            attendees.push(Attendee {
                kind: if i == 0 {
                    AttendeeType::Vip
                } else {
                    AttendeeType::Regular
                },
                group: Some("g".to_string()),
                priority: (i as u8 % 10) + 1,
                ..regular()
            });
        }
        let idx = AttendeeIndex::build(attendees).unwrap();
        let assignment: Assignment = (0..6).collect();
        let record = fitness(&assignment, &venue, &idx, &Weights::default()).unwrap();
        for v in [
            record.friend_proximity,
            record.vip_placement,
            record.group_cohesion,
            record.stage_distance,
            record.total,
        ] {
            assert!((0.0..=1.0).contains(&v), "sub-score out of range: {v}");
        }
    }
}
