//! Solution generators (C4): the random baseline and the greedy
//! priority-ordered heuristic used to seed the initial population.

use crate::attendees::AttendeeIndex;
use crate::models::{Assignment, AttendeeType, Preference};
use crate::venue::Venue;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly shuffles all seat positions (Fisher-Yates) and takes the first
/// `n` as the assignment.
pub fn random_assignment<R: Rng>(venue: &Venue, n: usize, rng: &mut R) -> Assignment {
    let mut positions: Vec<usize> = (0..venue.capacity()).collect();
    positions.shuffle(rng);
    positions.truncate(n);
    positions
}

/// Sort key for the greedy placement order: VIPs first, then higher
/// priority, then larger group size.
fn sort_key(idx: &AttendeeIndex, person: usize) -> (std::cmp::Reverse<u8>, std::cmp::Reverse<u8>, std::cmp::Reverse<usize>) {
    let attendee = &idx.attendees[person];
    let is_vip = matches!(attendee.kind, AttendeeType::Vip) as u8;
    let group_size = attendee
        .group
        .as_ref()
        .and_then(|g| idx.groups.get(g))
        .map_or(0, |members| members.len());
    (
        std::cmp::Reverse(is_vip),
        std::cmp::Reverse(attendee.priority),
        std::cmp::Reverse(group_size),
    )
}

fn preference_zone_bonus(preference: Preference, row: usize, rows: usize) -> f64 {
    let r = row as f64;
    let rows = rows as f64;
    let zone_ok = match preference {
        Preference::Any => false,
        Preference::Front => r < rows / 3.0,
        Preference::Middle => r >= rows / 3.0 && r < 2.0 * rows / 3.0,
        Preference::Back => r >= 2.0 * rows / 3.0,
    };
    if zone_ok {
        50.0
    } else {
        0.0
    }
}

/// Places attendees one at a time, in priority order, into the free seat
/// that locally maximizes a heuristic placement score.
pub fn greedy_assignment(venue: &Venue, idx: &AttendeeIndex) -> Assignment {
    let n = idx.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&p| sort_key(idx, p));

    let mut assignment = vec![usize::MAX; n];
    let mut occupied = vec![false; venue.capacity()];
    let mut placed_of: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();

    for &person in &order {
        let attendee = &idx.attendees[person];
        let mut best_seat = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut fallback = None;

        for pos in 0..venue.capacity() {
            if occupied[pos] {
                continue;
            }
            if fallback.is_none() {
                fallback = Some(pos);
            }
            let seat = venue.seat(pos);

            let mut score = 0.0;
            if matches!(attendee.kind, AttendeeType::Vip) {
                score += if seat.is_vip { 200.0 } else { -100.0 };
            }
            score += (200.0 * attendee.priority as f64 / 10.0) / (seat.distance_to_stage + 1.0);
            score += preference_zone_bonus(attendee.preference, seat.row, venue.rows);

            if let Some(group) = &attendee.group {
                if let Some(members) = idx.groups.get(group) {
                    for &m in members {
                        if let Some(&m_pos) = placed_of.get(&m) {
                            let d = venue.manhattan(pos, m_pos);
                            score += (100.0 - 20.0 * d as f64).max(0.0);
                        }
                    }
                }
            }

            if score > best_score {
                best_score = score;
                best_seat = Some(pos);
            }
        }

        let chosen = best_seat.or(fallback).expect("venue has a free seat for every attendee");
        assignment[person] = chosen;
        occupied[chosen] = true;
        placed_of.insert(person, chosen);
    }

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attendee;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn attendee(kind: AttendeeType, group: Option<&str>, priority: u8) -> Attendee {
        Attendee {
            id: None,
            kind,
            group: group.map(|s| s.to_string()),
            preference: Preference::Any,
            priority,
        }
    }

    #[test]
    fn random_assignment_is_a_permutation() {
        let venue = Venue::build(4, 4, 1).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let assignment = random_assignment(&venue, 10, &mut rng);
        assert_eq!(assignment.len(), 10);
        let set: HashSet<_> = assignment.iter().collect();
        assert_eq!(set.len(), 10);
        assert!(assignment.iter().all(|&p| p < venue.capacity()));
    }

    #[test]
    fn greedy_assignment_is_a_permutation() {
        let venue = Venue::build(4, 4, 1).unwrap();
        let attendees = vec![
            attendee(AttendeeType::Vip, None, 10),
            attendee(AttendeeType::Regular, Some("g"), 5),
            attendee(AttendeeType::Regular, Some("g"), 5),
            attendee(AttendeeType::Regular, None, 1),
        ];
        let idx = AttendeeIndex::build(attendees).unwrap();
        let assignment = greedy_assignment(&venue, &idx);
        let set: HashSet<_> = assignment.iter().collect();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn greedy_places_vip_in_vip_row_when_available() {
        let venue = Venue::build(4, 4, 1).unwrap();
        let idx = AttendeeIndex::build(vec![attendee(AttendeeType::Vip, None, 10)]).unwrap();
        let assignment = greedy_assignment(&venue, &idx);
        assert!(venue.seat(assignment[0]).is_vip);
    }

    #[test]
    fn greedy_seats_group_members_close_together() {
        let venue = Venue::build(3, 4, 0).unwrap();
        let idx = AttendeeIndex::build(vec![
            attendee(AttendeeType::Regular, Some("g"), 5),
            attendee(AttendeeType::Regular, Some("g"), 5),
            attendee(AttendeeType::Regular, Some("g"), 5),
        ])
        .unwrap();
        let assignment = greedy_assignment(&venue, &idx);
        let d01 = venue.manhattan(assignment[0], assignment[1]);
        let d02 = venue.manhattan(assignment[0], assignment[2]);
        let d12 = venue.manhattan(assignment[1], assignment[2]);
        assert!(d01 + d02 + d12 <= 6);
    }
}
