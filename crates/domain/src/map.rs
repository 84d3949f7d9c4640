// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::lookup::find_by_id;
use crate::types::{Coordinates, Location, LocationCategory};
use serde::{Deserialize, Serialize};

/// A location pinned on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub location_id: String,
    pub name: String,
    /// Resolved category name; `None` when unset or dangling.
    pub category_name: Option<String>,
    pub coordinates: Coordinates,
}

/// Builds one marker per location that has complete coordinates.
#[must_use]
pub fn map_markers(locations: &[Location], categories: &[LocationCategory]) -> Vec<MapMarker> {
    locations
        .iter()
        .filter_map(|location| {
            let coordinates: Coordinates = location.coordinates?;
            let category_name: Option<String> = location
                .category
                .as_deref()
                .and_then(|id| find_by_id(categories, id))
                .map(|category| category.name.clone());
            Some(MapMarker {
                location_id: location.id.clone(),
                name: location.name.clone(),
                category_name,
                coordinates,
            })
        })
        .collect()
}

/// The viewport that fits a set of markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinates,
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl MapView {
    /// Fits a bounding box around `markers`. Returns `None` for no markers.
    #[must_use]
    pub fn fit(markers: &[MapMarker]) -> Option<Self> {
        let first: Coordinates = markers.first()?.coordinates;
        let (south_west, north_east) = markers.iter().map(|m| m.coordinates).fold(
            (first, first),
            |(sw, ne), c| {
                (
                    Coordinates {
                        latitude: sw.latitude.min(c.latitude),
                        longitude: sw.longitude.min(c.longitude),
                    },
                    Coordinates {
                        latitude: ne.latitude.max(c.latitude),
                        longitude: ne.longitude.max(c.longitude),
                    },
                )
            },
        );

        Some(Self {
            center: Coordinates {
                latitude: f64::midpoint(south_west.latitude, north_east.latitude),
                longitude: f64::midpoint(south_west.longitude, north_east.longitude),
            },
            south_west,
            north_east,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    fn location(id: &str, category: Option<&str>, coordinates: Option<(f64, f64)>) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Location {id}"),
            category: category.map(str::to_string),
            description: None,
            coordinates: coordinates.map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            }),
        }
    }

    #[test]
    fn test_markers_skip_locations_without_coordinates() {
        let categories = vec![LocationCategory {
            id: String::from("beach"),
            name: String::from("Beach"),
            description: String::new(),
        }];
        let locations = vec![
            location("1", Some("beach"), Some((38.7, -9.1))),
            location("2", Some("beach"), None),
            location("3", Some("deleted"), Some((41.1, -8.6))),
        ];

        let markers = map_markers(&locations, &categories);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].category_name.as_deref(), Some("Beach"));
        assert_eq!(markers[1].category_name, None);
    }

    #[test]
    fn test_fit_bounds_and_center() {
        let markers = map_markers(
            &[
                location("1", None, Some((38.0, -9.0))),
                location("2", None, Some((42.0, -7.0))),
            ],
            &[],
        );
        let view = MapView::fit(&markers);
        assert_eq!(
            view,
            Some(MapView {
                center: Coordinates {
                    latitude: 40.0,
                    longitude: -8.0
                },
                south_west: Coordinates {
                    latitude: 38.0,
                    longitude: -9.0
                },
                north_east: Coordinates {
                    latitude: 42.0,
                    longitude: -7.0
                },
            })
        );
    }

    #[test]
    fn test_fit_without_markers() {
        assert_eq!(MapView::fit(&[]), None);
    }
}
