// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-collection lookups.
//!
//! Collections reference each other by id without any integrity guarantee,
//! so every lookup here can come back empty.

use crate::types::{
    Activity, ActivityGuide, ActivityType, Location, LocationCategory, Registration,
    TourGuideRequest, Track, UserProfile,
};
use serde::{Deserialize, Serialize};

/// A record with a document id.
pub trait Identified {
    /// Returns the document id.
    fn id(&self) -> &str;
}

macro_rules! identified_by {
    ($($record:ty => $field:ident),+ $(,)?) => {
        $(
            impl Identified for $record {
                fn id(&self) -> &str {
                    &self.$field
                }
            }
        )+
    };
}

identified_by! {
    Activity => id,
    ActivityType => id,
    LocationCategory => id,
    Location => id,
    Registration => id,
    UserProfile => id,
    TourGuideRequest => id,
    Track => id,
    ActivityGuide => activity_id,
}

/// Finds the record with the given id.
#[must_use]
pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// The outcome of resolving a list of ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved<T> {
    /// Records that were found, in the order their ids were listed.
    pub found: Vec<T>,
    /// Ids that matched nothing.
    pub missing: Vec<String>,
}

impl<T> Default for Resolved<T> {
    fn default() -> Self {
        Self {
            found: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Resolves each id in `ids` against `items`.
#[must_use]
pub fn resolve_ids<T: Identified + Clone>(items: &[T], ids: &[String]) -> Resolved<T> {
    let mut resolved: Resolved<T> = Resolved::default();
    for id in ids {
        match find_by_id(items, id) {
            Some(item) => resolved.found.push(item.clone()),
            None => resolved.missing.push(id.clone()),
        }
    }
    resolved
}

/// Guide requests that are approved and currently active.
#[must_use]
pub fn approved_guides(requests: &[TourGuideRequest]) -> Vec<&TourGuideRequest> {
    requests.iter().filter(|r| r.is_available_guide()).collect()
}

/// A track with every reference it makes resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDetails {
    pub track: Track,
    pub locations: Resolved<Location>,
    pub activities: Resolved<Activity>,
    /// `None` when no guide is set or the guide no longer exists.
    pub guide: Option<TourGuideRequest>,
}

/// Resolves a track's locations, activities and guide.
#[must_use]
pub fn resolve_track(
    track: Track,
    locations: &[Location],
    activities: &[Activity],
    guides: &[TourGuideRequest],
) -> TrackDetails {
    let guide: Option<TourGuideRequest> = track
        .tour_guide_id
        .as_deref()
        .and_then(|id| find_by_id(guides, id))
        .cloned();
    TrackDetails {
        locations: resolve_ids(locations, &track.location_ids),
        activities: resolve_ids(activities, &track.activity_ids),
        guide,
        track,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GuideRequestStatus, TrackStatus};

    fn guide(id: &str, status: GuideRequestStatus, active: bool) -> TourGuideRequest {
        TourGuideRequest {
            id: id.to_string(),
            full_name: format!("Guide {id}"),
            email: None,
            phone: None,
            regions: Vec::new(),
            languages: Vec::new(),
            status,
            active,
            submitted_at: None,
        }
    }

    fn location(id: &str) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: None,
            description: None,
            coordinates: None,
        }
    }

    #[test]
    fn test_resolve_ids_reports_missing() {
        let locations = vec![location("a"), location("b")];
        let ids = vec![String::from("b"), String::from("gone"), String::from("a")];
        let resolved = resolve_ids(&locations, &ids);

        let found: Vec<&str> = resolved.found.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(found, vec!["b", "a"]);
        assert_eq!(resolved.missing, vec![String::from("gone")]);
    }

    #[test]
    fn test_approved_guides_requires_active() {
        let requests = vec![
            guide("1", GuideRequestStatus::Approved, true),
            guide("2", GuideRequestStatus::Approved, false),
            guide("3", GuideRequestStatus::Pending, true),
        ];
        let approved = approved_guides(&requests);
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, "1");
    }

    #[test]
    fn test_resolve_track_with_dangling_guide() {
        let track = Track {
            id: String::from("t"),
            name: String::from("Coast walk"),
            location_ids: vec![String::from("a")],
            activity_ids: vec![String::from("x")],
            tour_guide_id: Some(String::from("removed")),
            start_time: None,
            duration_minutes: 60,
            status: TrackStatus::Pending,
        };
        let details = resolve_track(track, &[location("a")], &[], &[]);

        assert_eq!(details.locations.found.len(), 1);
        assert_eq!(details.activities.missing, vec![String::from("x")]);
        assert!(details.guide.is_none());
    }
}
