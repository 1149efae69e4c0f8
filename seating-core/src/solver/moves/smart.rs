//! Targeted "smart" mutations: single swaps chosen to directly address a
//! weak sub-score rather than a blind random swap.

use crate::attendees::AttendeeIndex;
use crate::models::{Assignment, AttendeeType};
use crate::venue::Venue;

/// Finds a friendship pair currently seated more than 3 apart, and a third
/// attendee adjacent (distance 1) to one member of that pair, then swaps the
/// third attendee with the *other* (far) member of the pair so the pair ends
/// up adjacent. At most one swap; returns whether one was performed.
///
/// Friendships are iterated in attendee-index order (both outer and inner)
/// so results are deterministic and reproducible across runs with the same
/// assignment, independent of hash map iteration order.
pub fn improve_friend_proximity(
    assignment: &mut Assignment,
    venue: &Venue,
    idx: &AttendeeIndex,
) -> bool {
    let mut pair_attendees: Vec<usize> = idx.friendships.keys().copied().collect();
    pair_attendees.sort_unstable();

    for i in pair_attendees {
        let mut friends: Vec<usize> = idx.friendships[&i].iter().copied().collect();
        friends.sort_unstable();
        for j in friends {
            if j <= i {
                continue;
            }
            if venue.manhattan(assignment[i], assignment[j]) <= 3 {
                continue;
            }
            for k in 0..idx.len() {
                if k == i || k == j {
                    continue;
                }
                if venue.manhattan(assignment[k], assignment[i]) == 1 {
                    assignment.swap(k, j);
                    return true;
                }
                if venue.manhattan(assignment[k], assignment[j]) == 1 {
                    assignment.swap(k, i);
                    return true;
                }
            }
        }
    }
    false
}

/// Finds the first VIP seated in a non-VIP seat and the first non-VIP seated
/// in a VIP seat, and swaps them. No-op if no such pair exists.
pub fn improve_vip_placement(assignment: &mut Assignment, venue: &Venue, idx: &AttendeeIndex) -> bool {
    let mut vip_in_regular_seat = None;
    let mut regular_in_vip_seat = None;

    for i in 0..idx.len() {
        let seat = venue.seat(assignment[i]);
        let is_vip = matches!(idx.attendees[i].kind, AttendeeType::Vip);
        if is_vip && !seat.is_vip && vip_in_regular_seat.is_none() {
            vip_in_regular_seat = Some(i);
        }
        if !is_vip && seat.is_vip && regular_in_vip_seat.is_none() {
            regular_in_vip_seat = Some(i);
        }
        if vip_in_regular_seat.is_some() && regular_in_vip_seat.is_some() {
            break;
        }
    }

    match (vip_in_regular_seat, regular_in_vip_seat) {
        (Some(a), Some(b)) => {
            assignment.swap(a, b);
            true
        }
        _ => false,
    }
}
