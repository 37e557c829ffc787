//! Map surface geometry
//!
//! This module contains:
//! - `mapper`: geo/surface coordinate conversion
//! - `markers`: place markers, hit-testing and overlay rectangles
//! - `geometry`: shared sizes and colours

pub mod geometry;
pub mod mapper;
pub mod markers;

pub use mapper::CoordinateMapper;
pub use markers::Marker;
