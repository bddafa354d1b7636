//! Query pipeline for the Seoul real-estate transaction open API:
//! fetch a page range of XML records, filter by district, convert to a
//! typed table, aggregate, export CSV, and geocode lot-number addresses.

pub mod aggregate;
pub mod convert;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod geocode;
