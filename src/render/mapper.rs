//! Affine mapping between geographic and surface coordinates
//!
//! The viewport is a plain lat/lng rectangle stretched over the surface:
//! longitude grows to the right, latitude grows upwards (so `y` shrinks as
//! `lat` grows). No projection distortion is modelled and nothing is clamped,
//! so points outside the bounds land outside `[0, size]`.

use crate::domain::{GeoBounds, GeoPoint, MapperError, SurfacePoint, SurfaceSize};

/// Map a geographic point onto the surface
pub fn geo_to_surface(
    point: GeoPoint,
    bounds: &GeoBounds,
    size: SurfaceSize,
) -> Result<SurfacePoint, MapperError> {
    let bounds = bounds.validate()?;
    let size = size.validate()?;
    let x = (point.lng - bounds.min_lng) / bounds.lng_span() * size.width;
    let y = (bounds.max_lat - point.lat) / bounds.lat_span() * size.height;
    Ok(SurfacePoint { x, y })
}

/// Inverse of [`geo_to_surface`]
pub fn surface_to_geo(
    point: SurfacePoint,
    bounds: &GeoBounds,
    size: SurfaceSize,
) -> Result<GeoPoint, MapperError> {
    let bounds = bounds.validate()?;
    let size = size.validate()?;
    let lng = bounds.min_lng + (point.x / size.width) * bounds.lng_span();
    let lat = bounds.max_lat - (point.y / size.height) * bounds.lat_span();
    Ok(GeoPoint { lat, lng })
}

/// Validated viewport bounds; the surface size is supplied per call
///
/// The size is passed on every call rather than stored, so a resize can never
/// leave stale pixel positions behind.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    bounds: GeoBounds,
}

impl CoordinateMapper {
    pub fn new(bounds: GeoBounds) -> Result<Self, MapperError> {
        Ok(Self {
            bounds: bounds.validate()?,
        })
    }

    pub fn to_surface(&self, point: GeoPoint, size: SurfaceSize) -> Result<SurfacePoint, MapperError> {
        geo_to_surface(point, &self.bounds, size)
    }

    pub fn to_geo(&self, point: SurfacePoint, size: SurfaceSize) -> Result<GeoPoint, MapperError> {
        surface_to_geo(point, &self.bounds, size)
    }
}
