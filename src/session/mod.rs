//! Session management module
//!
//! This module contains:
//! - The store holding places, filters and the selected region
//! - Message types for map and sidebar interactions
//! - Demo content for a fresh session

pub mod messages;
pub mod seed;
pub mod state;

pub use messages::Msg;
pub use state::Store;
