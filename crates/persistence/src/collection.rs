// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::error::PersistenceError;

/// A named collection of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Activities,
    ActivityTypes,
    Categories,
    Locations,
    Registrations,
    Users,
    /// Precomputed activity → assigned users aggregate.
    ActivityUsers,
    TourGuideRequests,
    Tracks,
    /// Guides assigned to each activity, keyed by activity id.
    ActivityGuides,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Self; 10] = [
        Self::Activities,
        Self::ActivityTypes,
        Self::Categories,
        Self::Locations,
        Self::Registrations,
        Self::Users,
        Self::ActivityUsers,
        Self::TourGuideRequests,
        Self::Tracks,
        Self::ActivityGuides,
    ];

    /// Returns the stored collection name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::ActivityTypes => "activityTypes",
            Self::Categories => "categories",
            Self::Locations => "locations",
            Self::Registrations => "registrations",
            Self::Users => "users",
            Self::ActivityUsers => "activityUsers",
            Self::TourGuideRequests => "tourGuideRequests",
            Self::Tracks => "tracks",
            Self::ActivityGuides => "activityGuides",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Collection {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PersistenceError::InvalidDocument {
                collection: s.to_string(),
                reason: String::from("unknown collection"),
            })
    }
}
