//! Attendee index (C2): group map and friendship map derived from the
//! attendee list.

use crate::models::{Attendee, SeatingError};
use std::collections::{HashMap, HashSet};

/// Preprocessed attendee data: the raw list plus a group map (group tag ->
/// ordered attendee indices) and a friendship map (attendee index -> set of
/// other indices sharing a group).
///
/// Built once per optimization call and treated as immutable for its
/// duration.
#[derive(Debug, Clone)]
pub struct AttendeeIndex {
    pub attendees: Vec<Attendee>,
    /// group tag -> ordered list of attendee indices, insertion order preserved
    pub groups: HashMap<String, Vec<usize>>,
    /// attendee index -> set of other attendee indices in the same group
    pub friendships: HashMap<usize, HashSet<usize>>,
}

impl AttendeeIndex {
    /// Builds `groups` and `friendships` from the attendee list.
    ///
    /// Contract: friendships are symmetric and exclude self; groups preserve
    /// attendee insertion order; priority defaults to 5 if missing (already
    /// handled by `Attendee`'s `Default`/`serde(default)`); if `id` is
    /// absent, the 0-based index is used.
    pub fn build(mut attendees: Vec<Attendee>) -> Result<AttendeeIndex, SeatingError> {
        if attendees.is_empty() {
            return Err(SeatingError::Config(
                "attendee list must not be empty".to_string(),
            ));
        }

        for (i, attendee) in attendees.iter_mut().enumerate() {
            if attendee.id.is_none() {
                attendee.id = Some(i.to_string());
            }
            attendee.priority = attendee.priority.clamp(1, 10);
        }

        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, attendee) in attendees.iter().enumerate() {
            if let Some(tag) = &attendee.group {
                groups.entry(tag.clone()).or_default().push(i);
            }
        }

        let mut friendships: HashMap<usize, HashSet<usize>> = HashMap::new();
        for members in groups.values() {
            if members.len() < 2 {
                continue;
            }
            for &i in members {
                for &j in members {
                    if i != j {
                        friendships.entry(i).or_default().insert(j);
                    }
                }
            }
        }

        Ok(AttendeeIndex {
            attendees,
            groups,
            friendships,
        })
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }
}
