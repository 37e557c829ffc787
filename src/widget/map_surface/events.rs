//! Event types for the MapSurface widget
//!
//! These events provide a decoupled interface between the surface and the
//! application's message system. The shell translates raw input into
//! `PointerEvent`s and the `MapEvent`s coming back into its own messages.

use crate::domain::{GeoPoint, SelectedRegion, SurfacePoint};

/// Pointer input in surface-relative pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(SurfacePoint),
    Move(SurfacePoint),
    Up(SurfacePoint),
    /// Pointer left the surface
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::Down(SurfacePoint::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move(SurfacePoint::new(x, y))
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::Up(SurfacePoint::new(x, y))
    }
}

/// Events raised by the surface to its owner
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// A drag finished; the region is normalised
    RegionSelected(SelectedRegion),
    /// Position clicked while adding a place
    PlacementPositionChosen(GeoPoint),
    /// A marker was clicked
    PlaceClicked(String),
}
