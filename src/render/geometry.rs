//! Shared geometry constants for the map surface
//!
//! Kept separate from the projection code so the shell and any future
//! renderer agree on marker and overlay sizes.

/// Place marker constants
pub mod marker {
    /// Marker disc diameter in logical pixels
    pub const DIAMETER: f64 = 32.0;
    /// Hit radius around a marker centre
    pub const HIT_RADIUS: f64 = DIAMETER / 2.0;
    /// Scale applied to the selected marker
    pub const SELECTED_SCALE: f64 = 1.25;
    /// Icon drawn instead of the category icon for imported favourites
    pub const FAVORITE_ICON: &str = "⭐";
}

/// Overlay colours (CSS hex)
pub mod overlay {
    /// Selection box drawn while dragging
    pub const SELECTION_COLOR: &str = "#3b82f6";
    /// Committed region outline
    pub const REGION_COLOR: &str = "#22c55e";
}

/// Whether `(px, py)` is within `radius` of `(cx, cy)`
#[inline]
pub fn within_radius(cx: f64, cy: f64, px: f64, py: f64, radius: f64) -> bool {
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= radius * radius
}
