//! Region selection types and the membership test

use super::geometry::GeoPoint;
use super::place::Place;

/// Geographic rectangle picked by the user
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectedRegion {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl SelectedRegion {
    /// Region spanned by two arbitrary corners
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            north: a.lat.max(b.lat),
            south: a.lat.min(b.lat),
            east: a.lng.max(b.lng),
            west: a.lng.min(b.lng),
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }

    /// Both bounds inclusive on each axis
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}

/// Whether a place lies inside a region
pub fn is_in_region(place: &Place, region: &SelectedRegion) -> bool {
    region.contains(place.coordinates)
}

/// Places inside `region`, in input order
pub fn filter_in_region<'a, I>(places: I, region: &SelectedRegion) -> Vec<&'a Place>
where
    I: IntoIterator<Item = &'a Place>,
{
    places
        .into_iter()
        .filter(|p| is_in_region(p, region))
        .collect()
}

/// Pointer drag in progress on the map surface
///
/// Both corners are kept in geographic coordinates and projected with the
/// size current at draw time, so a resize mid-drag keeps the anchor in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    pub start: GeoPoint,
    pub current: GeoPoint,
}

impl DragGesture {
    pub fn new(start: GeoPoint) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Region spanned by the drag so far
    pub fn region(&self) -> SelectedRegion {
        SelectedRegion::from_corners(self.start, self.current)
    }
}

/// What a pointer-down on the map does
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Drag to select a region
    #[default]
    SelectRegion,
    /// Click to pick the position of a new place
    AddPlace,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_at(id: &str, lat: f64, lng: f64) -> Place {
        Place {
            id: id.to_string(),
            name: id.to_string(),
            coordinates: GeoPoint::new(lat, lng),
            category_id: "cafe".to_string(),
            author: String::new(),
            comment: String::new(),
            is_favorite: false,
            is_imported_favorite: false,
        }
    }

    fn region() -> SelectedRegion {
        SelectedRegion {
            north: 37.56,
            south: 37.555,
            east: 126.925,
            west: 126.92,
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let r = region();
        assert!(is_in_region(&place_at("n", 37.56, 126.922), &r));
        assert!(is_in_region(&place_at("s", 37.555, 126.922), &r));
        assert!(is_in_region(&place_at("e", 37.557, 126.925), &r));
        assert!(is_in_region(&place_at("w", 37.557, 126.92), &r));
        assert!(!is_in_region(&place_at("out", 37.5601, 126.922), &r));
        assert!(!is_in_region(&place_at("out", 37.557, 126.9251), &r));
    }

    #[test]
    fn test_filter_preserves_order() {
        let places = vec![
            place_at("c", 37.557, 126.921),
            place_at("x", 37.60, 126.921),
            place_at("a", 37.556, 126.924),
            place_at("b", 37.558, 126.922),
        ];
        let ids: Vec<_> = filter_in_region(&places, &region())
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_point_region_matches_only_exact_point() {
        let p = GeoPoint::new(37.5563, 126.9236);
        let r = SelectedRegion::from_corners(p, p);
        assert_eq!(r.north, r.south);
        assert_eq!(r.east, r.west);
        assert!(is_in_region(&place_at("hit", 37.5563, 126.9236), &r));
        assert!(!is_in_region(&place_at("miss", 37.5564, 126.9236), &r));
    }

    #[test]
    fn test_from_corners_is_order_independent() {
        let a = GeoPoint::new(37.551, 126.933);
        let b = GeoPoint::new(37.562, 126.918);
        assert_eq!(SelectedRegion::from_corners(a, b), SelectedRegion::from_corners(b, a));
        let r = SelectedRegion::from_corners(a, b);
        assert!(r.south <= r.north && r.west <= r.east);
    }
}
