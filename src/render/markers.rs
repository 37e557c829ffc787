//! Projection of places and overlays onto the map surface
//!
//! Everything here is recomputed from the geographic bounds on each call;
//! results must not be kept across a resize.

use crate::domain::{
    Category, DragGesture, GeoPoint, MapperError, Place, SelectedRegion, SurfacePoint, SurfaceRect,
    SurfaceSize, find_category,
};

use super::geometry::{marker, within_radius};
use super::mapper::CoordinateMapper;

/// A place positioned on the surface, with its styling
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub place_id: String,
    pub name: String,
    pub position: SurfacePoint,
    pub color: String,
    pub icon: String,
    pub selected: bool,
}

/// Project places in input order; places whose category is unknown are skipped
pub fn project_markers(
    mapper: &CoordinateMapper,
    places: &[&Place],
    categories: &[Category],
    size: SurfaceSize,
    selected_id: Option<&str>,
) -> Result<Vec<Marker>, MapperError> {
    let mut markers = Vec::with_capacity(places.len());
    for place in places {
        let Some(category) = find_category(categories, &place.category_id) else {
            log::debug!(
                "Skipping place {} with unknown category {}",
                place.id,
                place.category_id
            );
            continue;
        };
        let position = mapper.to_surface(place.coordinates, size)?;
        let icon = if place.is_imported_favorite {
            marker::FAVORITE_ICON.to_string()
        } else {
            category.icon.clone()
        };
        markers.push(Marker {
            place_id: place.id.clone(),
            name: place.name.clone(),
            position,
            color: category.color.clone(),
            icon,
            selected: selected_id == Some(place.id.as_str()),
        });
    }
    Ok(markers)
}

/// Topmost marker under `point`
///
/// Markers are drawn in order, so the last one that matches is on top.
pub fn hit_test(markers: &[Marker], point: SurfacePoint) -> Option<&Marker> {
    markers.iter().rev().find(|m| {
        let radius = if m.selected {
            marker::HIT_RADIUS * marker::SELECTED_SCALE
        } else {
            marker::HIT_RADIUS
        };
        within_radius(m.position.x, m.position.y, point.x, point.y, radius)
    })
}

/// Surface rectangle covering a committed region
pub fn region_overlay(
    mapper: &CoordinateMapper,
    region: &SelectedRegion,
    size: SurfaceSize,
) -> Result<SurfaceRect, MapperError> {
    let top_left = mapper.to_surface(GeoPoint::new(region.north, region.west), size)?;
    let bottom_right = mapper.to_surface(GeoPoint::new(region.south, region.east), size)?;
    Ok(SurfaceRect::from_corners(top_left, bottom_right))
}

/// Selection box for an in-progress drag
pub fn selection_box(
    mapper: &CoordinateMapper,
    gesture: &DragGesture,
    size: SurfaceSize,
) -> Result<SurfaceRect, MapperError> {
    region_overlay(mapper, &gesture.region(), size)
}
