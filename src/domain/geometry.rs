//! Geometric types for map viewports and surface coordinates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a mapping is configured with unusable dimensions
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapperError {
    /// Bounds with zero (or negative) latitude/longitude span, or non-finite edges
    #[error(
        "degenerate map bounds: lat {min_lat}..{max_lat}, lng {min_lng}..{max_lng}"
    )]
    DegenerateBounds {
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    },
    /// Surface with no drawable area
    #[error("surface has no drawable area: {width}x{height}")]
    EmptySurface { width: f64, height: f64 },
}

/// Geographic point in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Point in surface pixels, origin at the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the rendering surface at the time of a conversion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject sizes that would divide by zero or produce NaN
    pub fn validate(self) -> Result<Self, MapperError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(self)
        } else {
            Err(MapperError::EmptySurface {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Visible map viewport in geographic coordinates
///
/// Always non-degenerate: construct through [`GeoBounds::new`] or
/// [`GeoBounds::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Create bounds, failing on zero-span, inverted or non-finite edges
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Result<Self, MapperError> {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
        .validate()
    }

    /// Check the invariant on bounds that were deserialized or built by hand
    pub fn validate(self) -> Result<Self, MapperError> {
        let finite = [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.min_lat < self.max_lat && self.min_lng < self.max_lng {
            Ok(self)
        } else {
            Err(MapperError::DegenerateBounds {
                min_lat: self.min_lat,
                max_lat: self.max_lat,
                min_lng: self.min_lng,
                max_lng: self.max_lng,
            })
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Hongdae area viewport the application ships with
    pub fn hongdae() -> Self {
        Self {
            min_lat: 37.55,
            max_lat: 37.565,
            min_lng: 126.915,
            max_lng: 126.935,
        }
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SurfaceRect {
    /// Build a rectangle from two arbitrary corners
    pub fn from_corners(a: SurfacePoint, b: SurfacePoint) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_rejects_degenerate() {
        assert!(GeoBounds::new(37.55, 37.55, 126.915, 126.935).is_err());
        assert!(GeoBounds::new(37.55, 37.565, 126.935, 126.935).is_err());
        assert!(GeoBounds::new(37.565, 37.55, 126.915, 126.935).is_err());
        assert!(GeoBounds::new(f64::NAN, 37.565, 126.915, 126.935).is_err());
        assert!(GeoBounds::new(37.55, 37.565, 126.915, 126.935).is_ok());
    }

    #[test]
    fn test_surface_size_validation() {
        assert!(SurfaceSize::new(800.0, 600.0).validate().is_ok());
        assert_eq!(
            SurfaceSize::new(0.0, 600.0).validate(),
            Err(MapperError::EmptySurface {
                width: 0.0,
                height: 600.0
            })
        );
        assert!(SurfaceSize::new(800.0, -1.0).validate().is_err());
        assert!(SurfaceSize::new(f64::INFINITY, 600.0).validate().is_err());
    }

    #[test]
    fn test_rect_from_corners_is_normalized() {
        let r = SurfaceRect::from_corners(SurfacePoint::new(300.0, 50.0), SurfacePoint::new(100.0, 100.0));
        assert_eq!(r.left, 100.0);
        assert_eq!(r.top, 50.0);
        assert_eq!(r.width(), 200.0);
        assert_eq!(r.height(), 50.0);
    }
}
