//! Map surface widget and related types
//!
//! This module contains the `MapSurface` which handles the interactive
//! part of the map:
//! - Drag-to-rectangle region selection
//! - Click-to-place while adding a new place
//! - Marker hit-testing
//!
//! ## Architecture
//!
//! The surface owns only its interaction state (the drag gesture and the
//! highlighted marker). Places, categories, the committed region and the
//! surface size are passed in on every call so nothing pixel-based outlives
//! a resize.
//!
//! Results are emitted as `MapEvent`s and converted to `Msg` by the shell.

pub mod events;
pub mod widget;

pub use events::{MapEvent, PointerEvent};
pub use widget::{MapSurface, PointerContext, SelectorState, SurfaceView};
