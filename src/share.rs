//! Share links: a region and a category filter packed into a query string
//!
//! `build` produces `{origin}?north=..&south=..&east=..&west=..&categories=a%2Cb`
//! and `parse` reads such a link back into a `SharedView`.

use thiserror::Error;

use crate::domain::{GeoPoint, SelectedRegion};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("select a region on the map first")]
    NoRegion,
    #[error("share link has no query string")]
    MissingQuery,
    #[error("share link is missing `{0}`")]
    MissingParam(&'static str),
    #[error("`{key}` is not a number: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("malformed percent escape in share link")]
    BadEscape,
}

/// What a share link restores
#[derive(Clone, Debug, PartialEq)]
pub struct SharedView {
    pub region: SelectedRegion,
    pub categories: Vec<String>,
}

/// Build a share link for a region and the enabled category ids
pub fn build(origin: &str, region: &SelectedRegion, categories: &[String]) -> String {
    let params = [
        ("north", region.north.to_string()),
        ("south", region.south.to_string()),
        ("east", region.east.to_string()),
        ("west", region.west.to_string()),
        ("categories", categories.join(",")),
    ];
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", encode_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{query}", origin.trim_end_matches('?'))
}

/// Read a share link back; unknown parameters are ignored
pub fn parse(url: &str) -> Result<SharedView, ShareError> {
    let (_, query) = url.split_once('?').ok_or(ShareError::MissingQuery)?;
    let query = query.split('#').next().unwrap_or_default();

    let mut north = None;
    let mut south = None;
    let mut east = None;
    let mut west = None;
    let mut categories = Vec::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(raw)?;
        match key {
            "north" => north = Some(number("north", &value)?),
            "south" => south = Some(number("south", &value)?),
            "east" => east = Some(number("east", &value)?),
            "west" => west = Some(number("west", &value)?),
            "categories" => {
                categories = value
                    .split(',')
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            other => log::debug!("Ignoring share link parameter {other}"),
        }
    }

    let north = north.ok_or(ShareError::MissingParam("north"))?;
    let south = south.ok_or(ShareError::MissingParam("south"))?;
    let east = east.ok_or(ShareError::MissingParam("east"))?;
    let west = west.ok_or(ShareError::MissingParam("west"))?;

    Ok(SharedView {
        region: SelectedRegion::from_corners(GeoPoint::new(north, west), GeoPoint::new(south, east)),
        categories,
    })
}

/// Region bounds rounded for display, south..north and west..east
pub fn summary(region: &SelectedRegion) -> (String, String) {
    (
        format!("{:.4} ~ {:.4}", region.south, region.north),
        format!("{:.4} ~ {:.4}", region.west, region.east),
    )
}

fn number(key: &'static str, value: &str) -> Result<f64, ShareError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ShareError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

/// Percent-encode everything outside the form-urlencoded safe set
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_component(value: &str) -> Result<String, ShareError> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).ok_or(ShareError::BadEscape)?;
                let hex = std::str::from_utf8(hex).map_err(|_| ShareError::BadEscape)?;
                out.push(u8::from_str_radix(hex, 16).map_err(|_| ShareError::BadEscape)?);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out).map_err(|_| ShareError::BadEscape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> SelectedRegion {
        SelectedRegion {
            north: 37.5575,
            south: 37.555,
            east: 126.925,
            west: 126.9175,
        }
    }

    #[test]
    fn test_build_matches_search_params_format() {
        let url = build(
            "http://localhost:3000",
            &region(),
            &["restaurant".to_string(), "cafe".to_string()],
        );
        assert_eq!(
            url,
            "http://localhost:3000?north=37.5575&south=37.555&east=126.925&west=126.9175&categories=restaurant%2Ccafe"
        );
    }

    #[test]
    fn test_parse_restores_view() {
        let cats = vec!["culture".to_string(), "cafe".to_string()];
        let view = parse(&build("https://maps.example", &region(), &cats)).unwrap();
        assert_eq!(view.region, region());
        assert_eq!(view.categories, cats);
    }

    #[test]
    fn test_parse_accepts_literal_commas_and_swapped_bounds() {
        let view = parse("https://x/?south=37.56&north=37.55&east=126.92&west=126.93&categories=a,b&utm=1")
            .unwrap();
        assert_eq!(view.region.north, 37.56);
        assert_eq!(view.region.south, 37.55);
        assert_eq!(view.region.east, 126.93);
        assert_eq!(view.region.west, 126.92);
        assert_eq!(view.categories, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("https://x"), Err(ShareError::MissingQuery));
        assert_eq!(
            parse("https://x?north=1&south=0&east=1"),
            Err(ShareError::MissingParam("west"))
        );
        assert!(matches!(
            parse("https://x?north=abc&south=0&east=1&west=0"),
            Err(ShareError::InvalidNumber { key: "north", .. })
        ));
        assert_eq!(parse("https://x?north=%G1"), Err(ShareError::BadEscape));
        // Empty category list is fine
        let view = parse("https://x?north=1&south=0&east=1&west=0&categories=").unwrap();
        assert!(view.categories.is_empty());
    }

    #[test]
    fn test_summary_rounds_to_four_places() {
        let (lat, lng) = summary(&region());
        assert_eq!(lat, "37.5550 ~ 37.5575");
        assert_eq!(lng, "126.9175 ~ 126.9250");
    }
}
