//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the application.
//! Types here should have no UI or runtime dependencies (tokio, i18n, etc.)
//! so they can be shared by the surface, the store and the shell.

pub mod geometry;
pub mod meetup;
pub mod place;
pub mod selection;
pub mod shared_map;

pub use geometry::*;
pub use meetup::*;
pub use place::*;
pub use selection::*;
pub use shared_map::*;
