//! Simulated geocoding for the Hongdae area
//!
//! Stands in for a real geocoding service: waits a fixed latency, then picks
//! the table entry whose centre is closest to the region's centre.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use super::{AddressResolver, AreaSize, GeoText};
use crate::domain::{GeoPoint, SelectedRegion};

/// Address used when nothing in the table is closer
pub const FALLBACK_ADDRESS: &str = "서울특별시 마포구 홍대 일대";

const DETAILED_ADDRESSES: [&str; 5] = [
    "서울특별시 마포구 와우산로 29길 15",
    "서울특별시 마포구 홍익로 3길 20",
    "서울특별시 마포구 동교로 23길 7",
    "서울특별시 마포구 어울마당로 5길 12",
    "서울특별시 마포구 월드컵로 10길 25",
];

/// One row of the address table
#[derive(Clone, Debug, PartialEq)]
pub struct MockAddress {
    pub bounds: SelectedRegion,
    pub address: String,
}

impl MockAddress {
    fn new(north: f64, south: f64, east: f64, west: f64, address: &str) -> Self {
        Self {
            bounds: SelectedRegion {
                north,
                south,
                east,
                west,
            },
            address: address.to_string(),
        }
    }
}

/// Default table covering the shipped viewport
pub fn hongdae_table() -> Vec<MockAddress> {
    vec![
        MockAddress::new(37.5565, 37.555, 126.925, 126.92, "서울특별시 마포구 와우산로 일대"),
        MockAddress::new(37.56, 37.555, 126.93, 126.925, "서울특별시 마포구 홍익로 일대"),
        MockAddress::new(37.565, 37.56, 126.935, 126.93, "서울특별시 마포구 동교로 일대"),
        MockAddress::new(37.56, 37.555, 126.925, 126.92, "서울특별시 마포구 어울마당로 일대"),
        MockAddress::new(37.565, 37.56, 126.925, 126.92, "서울특별시 마포구 월드컵로 일대"),
    ]
}

/// Nearest table entry by centre distance; the first entry wins ties
pub fn nearest_address<'a>(table: &'a [MockAddress], center: GeoPoint) -> &'a str {
    let mut closest = FALLBACK_ADDRESS;
    let mut min_distance = f64::INFINITY;
    for entry in table {
        let c = entry.bounds.center();
        let distance = ((center.lat - c.lat).powi(2) + (center.lng - c.lng).powi(2)).sqrt();
        if distance < min_distance {
            min_distance = distance;
            closest = entry.address.as_str();
        }
    }
    closest
}

/// Resolve a region synchronously (no latency)
pub fn describe(table: &[MockAddress], region: &SelectedRegion) -> GeoText {
    GeoText {
        address: nearest_address(table, region.center()).to_string(),
        area: AreaSize::classify(region),
    }
}

/// Street-level address for a single point
pub fn detailed_address(lat: f64, lng: f64) -> &'static str {
    let index = ((lat + lng) * 1000.0).floor() as i64;
    DETAILED_ADDRESSES[index.rem_euclid(DETAILED_ADDRESSES.len() as i64) as usize]
}

pub struct MockAddressResolver {
    table: Arc<[MockAddress]>,
    latency: Duration,
}

impl MockAddressResolver {
    pub fn new(table: Vec<MockAddress>, latency: Duration) -> Self {
        Self {
            table: table.into(),
            latency,
        }
    }

    pub fn hongdae(latency: Duration) -> Self {
        Self::new(hongdae_table(), latency)
    }
}

impl AddressResolver for MockAddressResolver {
    fn resolve(&self, region: SelectedRegion) -> BoxFuture<'static, anyhow::Result<GeoText>> {
        let table = Arc::clone(&self.table);
        let latency = self.latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            Ok(describe(&table, &region))
        })
    }
}
