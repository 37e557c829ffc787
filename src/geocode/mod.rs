//! Address lookup for selected regions
//!
//! This module contains:
//! - The `AddressResolver` capability used by the shell
//! - A mock resolver backed by a small static table
//! - `AddressLookup`, which supersedes in-flight requests so a slow answer
//!   never overwrites a newer one

pub mod lookup;
pub mod mock;

use futures::future::BoxFuture;

use crate::domain::SelectedRegion;

pub use lookup::{AddressLookup, LookupResult, LookupStatus};
pub use mock::MockAddressResolver;

/// Rough size class of a region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaSize {
    Wide,
    Medium,
    Narrow,
}

impl AreaSize {
    /// Classify by `lat span * lng span * 10000`
    pub fn classify(region: &SelectedRegion) -> Self {
        let area = (region.north - region.south) * (region.east - region.west) * 10000.0;
        if area > 0.5 {
            AreaSize::Wide
        } else if area > 0.1 {
            AreaSize::Medium
        } else {
            AreaSize::Narrow
        }
    }
}

/// Human readable description of a region
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeoText {
    pub address: String,
    pub area: AreaSize,
}

/// Turns a region into an address. Implementations may be slow; the future
/// is spawned so it must own everything it needs.
pub trait AddressResolver: Send + Sync + 'static {
    fn resolve(&self, region: SelectedRegion) -> BoxFuture<'static, anyhow::Result<GeoText>>;
}
