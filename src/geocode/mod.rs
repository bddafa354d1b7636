// src/geocode/mod.rs
pub mod pacer;

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, error};

use self::pacer::RequestPacer;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "seoul_real_estate_app";
// Nominatim's usage policy caps clients at one request per second.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);
const CITY: &str = "서울특별시";

/// Sub-lot values that mean "no sub-lot"; the feed uses both an empty tag
/// and the literal `0000` placeholder (absent tags are normalized to `""`
/// upstream).
const NO_SUB_LOT: &[&str] = &["", "0000"];

/// Whether a sub-lot value is one of the feed's "no sub-lot" placeholders.
pub fn is_no_sub_lot(sub_lot: &str) -> bool {
    NO_SUB_LOT.contains(&sub_lot)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Blocking Nominatim adapter. Lookups run strictly one at a time through a
/// [`RequestPacer`] and are memoized per instance, negative results
/// included. No retries; a provider failure only loses that point.
pub struct Geocoder {
    client: Client,
    pacer: RequestPacer,
    memo: HashMap<String, Option<GeoPoint>>,
}

impl Geocoder {
    pub fn new() -> Result<Self> {
        // Nominatim rejects requests without an identifying User-Agent.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build geocoding client")?;
        Ok(Self {
            client,
            pacer: RequestPacer::new(MIN_REQUEST_INTERVAL),
            memo: HashMap::new(),
        })
    }

    /// Resolve a free-form address. Provider errors are logged and yield
    /// `None`, as does an empty result set.
    pub fn lookup(&mut self, address: &str) -> Option<GeoPoint> {
        if let Some(cached) = self.memo.get(address) {
            return *cached;
        }
        self.pacer.wait();
        let point = match self.search(address) {
            Ok(point) => point,
            Err(err) => {
                error!(address, %err, "geocoding failed");
                None
            }
        };
        if point.is_none() {
            debug!(address, "no geocoding result");
        }
        self.memo.insert(address.to_string(), point);
        point
    }

    fn search(&self, address: &str) -> Result<Option<GeoPoint>> {
        let hits: Vec<SearchHit> = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()
            .context("malformed geocoding response")?;
        Ok(hits.first().and_then(|hit| {
            Some(GeoPoint {
                lat: hit.lat.parse().ok()?,
                lon: hit.lon.parse().ok()?,
            })
        }))
    }
}

/// Build the lot-number street address for one transaction, or `None` when
/// the main lot is unusable. The sub-lot is appended as `-{sub_lot}` unless
/// it is a "no sub-lot" placeholder.
pub fn build_address(
    district: &str,
    sub_district: &str,
    main_lot: &str,
    sub_lot: &str,
) -> Option<String> {
    if main_lot.is_empty() {
        return None;
    }
    let base = format!("{CITY} {district} {sub_district} {main_lot}");
    if is_no_sub_lot(sub_lot) {
        Some(base)
    } else {
        Some(format!("{base}-{sub_lot}"))
    }
}
