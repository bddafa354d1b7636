// src/fetch/mod.rs
pub mod xml;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

pub use xml::RawRow;

const BASE_URL: &str = "http://openapi.seoul.go.kr:8088";
const SERVICE: &str = "tbLnOpendataRtmsV";

/// URL for one bounded page range of the transaction service.
fn request_url(api_key: &str, start: u32, end: u32) -> Result<Url> {
    Url::parse(&format!("{BASE_URL}/{api_key}/xml/{SERVICE}/{start}/{end}"))
        .context("invalid open API request URL")
}

/// Issue a single GET for records `start..=end` and decode the `<row>`
/// elements of the XML body. No retries and no automatic pagination; the
/// caller picks the range. A body without rows decodes to an empty vec.
pub fn fetch_rows(client: &Client, api_key: &str, start: u32, end: u32) -> Result<Vec<RawRow>> {
    let url = request_url(api_key, start, end)?;
    let resp = client
        .get(url.as_str())
        .send()
        .with_context(|| format!("request failed for records {start}..={end}"))?
        .error_for_status()
        .context("open API returned an error status")?;
    let body = resp.text().context("failed to read API response body")?;

    let rows = xml::decode_rows(&body);
    debug!(start, end, count = rows.len(), "decoded transaction rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_interpolates_range() {
        let url = request_url("testkey", 1, 1000).unwrap();
        assert_eq!(
            url.as_str(),
            "http://openapi.seoul.go.kr:8088/testkey/xml/tbLnOpendataRtmsV/1/1000"
        );
    }
}
