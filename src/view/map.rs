use crate::domain::format::meters;
use crate::domain::models::Dataset;
use crate::view::ViewError;

pub const DEFAULT_FOCUS_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub title: String,
    pub popup: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
}

pub trait MapSurface {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: Marker) -> Result<(), ViewError>;
    fn set_view(&mut self, center: LatLon, zoom: u8);
}

/// Map handle that keeps markers and the current view in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryMap {
    pub markers: Vec<Marker>,
    pub view: MapView,
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            view: MapView {
                center: LatLon {
                    latitude: 0.0,
                    longitude: 0.0,
                },
                zoom: 2,
            },
        }
    }
}

impl MapSurface for MemoryMap {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: Marker) -> Result<(), ViewError> {
        let LatLon {
            latitude,
            longitude,
        } = marker.position;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ViewError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        self.markers.push(marker);
        Ok(())
    }

    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.view = MapView { center, zoom };
    }
}

fn reference_point(dataset: &Dataset) -> LatLon {
    LatLon {
        latitude: dataset.results.reference_position.latitude,
        longitude: dataset.results.reference_position.longitude,
    }
}

/// Redraws one marker per dataset and focuses the first one. A marker the surface
/// refuses is logged and skipped; returns how many markers were placed.
pub fn render_map<M: MapSurface>(datasets: &[Dataset], map: &mut M, focus_zoom: u8) -> usize {
    map.clear_markers();

    let mut placed = 0;
    for dataset in datasets {
        let marker = Marker {
            position: reference_point(dataset),
            title: dataset.name.clone(),
            popup: vec![
                format!("RMSE (H): {}", meters(dataset.results.horizontal.rmse)),
                format!("RMSE (V): {}", meters(dataset.results.vertical.rmse)),
            ],
        };
        match map.add_marker(marker) {
            Ok(()) => placed += 1,
            Err(error) => {
                tracing::warn!(dataset_id = %dataset.id, error = %error, "marker skipped");
            }
        }
    }

    if let Some(first) = datasets.first() {
        map.set_view(reference_point(first), focus_zoom);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FOCUS_ZOOM, LatLon, MapSurface, Marker, MemoryMap, render_map};
    use crate::test_support::{sample_dataset, sample_dataset_at};
    use crate::view::ViewError;

    #[test]
    fn places_one_marker_per_dataset_and_focuses_first() {
        let datasets = vec![
            sample_dataset_at(1, "north", 60.1, 24.9),
            sample_dataset_at(2, "south", -33.9, 18.4),
        ];
        let mut map = MemoryMap::default();

        let placed = render_map(&datasets, &mut map, DEFAULT_FOCUS_ZOOM);

        assert_eq!(placed, 2);
        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.markers[1].title, "south");
        assert_eq!(map.markers[0].popup[0], "RMSE (H): 0.100 m");
        assert_eq!(
            map.view.center,
            LatLon {
                latitude: 60.1,
                longitude: 24.9
            }
        );
        assert_eq!(map.view.zoom, 13);
    }

    #[test]
    fn empty_listing_clears_markers_and_keeps_view() {
        let mut map = MemoryMap::default();
        render_map(&[sample_dataset(1, "a", 0.1, 0.2)], &mut map, 13);
        let before = map.view;

        assert_eq!(render_map(&[], &mut map, 13), 0);

        assert!(map.markers.is_empty());
        assert_eq!(map.view, before);
    }

    #[test]
    fn out_of_range_marker_is_skipped_and_rest_still_render() {
        let datasets = vec![
            sample_dataset_at(1, "bad", 123.0, 0.0),
            sample_dataset_at(2, "good", 60.0, 24.0),
        ];
        let mut map = MemoryMap::default();

        let placed = render_map(&datasets, &mut map, 13);

        assert_eq!(placed, 1);
        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].title, "good");
        assert_eq!(map.view.zoom, 13);
        assert_eq!(
            map.view.center,
            LatLon {
                latitude: 123.0,
                longitude: 0.0
            }
        );
    }

    #[test]
    fn memory_map_rejects_out_of_range_coordinates() {
        let mut map = MemoryMap::default();

        let result = map.add_marker(Marker {
            position: LatLon {
                latitude: 0.0,
                longitude: 181.0,
            },
            title: "east".to_string(),
            popup: Vec::new(),
        });

        assert_eq!(
            result,
            Err(ViewError::InvalidCoordinate {
                latitude: 0.0,
                longitude: 181.0
            })
        );
        assert!(map.markers.is_empty());
    }
}
