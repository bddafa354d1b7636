// src/convert.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::NormalizedRow;

/// One typed transaction. Unparsable date or numeric fields become `None`
/// rather than failing the conversion; the row itself is always kept.
/// `unit_price` is defined iff both amount and area are defined and the
/// area is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub receipt_year: String,
    pub district: String,
    pub sub_district: String,
    pub main_lot: String,
    pub sub_lot: String,
    pub building_name: String,
    pub contract_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub area: Option<f64>,
    pub unit_price: Option<f64>,
}

/// Convert filtered rows into the typed table. Zero rows in, zero rows out.
pub fn to_transactions(rows: &[NormalizedRow]) -> Vec<Transaction> {
    rows.iter().map(to_transaction).collect()
}

fn to_transaction(row: &NormalizedRow) -> Transaction {
    let amount = parse_number(&row.amount);
    let area = parse_number(&row.area);
    Transaction {
        receipt_year: row.receipt_year.clone(),
        district: row.district.clone(),
        sub_district: row.sub_district.clone(),
        main_lot: row.main_lot.clone(),
        sub_lot: row.sub_lot.clone(),
        building_name: row.building_name.clone(),
        contract_date: parse_contract_day(&row.contract_day),
        amount,
        area,
        unit_price: unit_price(amount, area),
    }
}

/// Strict `YYYYMMDD`; invalid calendar dates such as `20230230` are absent.
fn parse_contract_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d").ok()
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

fn unit_price(amount: Option<f64>, area: Option<f64>) -> Option<f64> {
    match (amount, area) {
        (Some(amount), Some(area)) if area > 0.0 => Some(amount / area),
        _ => None,
    }
}

/// Keep only transactions whose contract date falls within the inclusive
/// range. Rows without a contract date drop out while a range is active.
pub fn filter_date_range(rows: Vec<Transaction>, from: NaiveDate, to: NaiveDate) -> Vec<Transaction> {
    rows.into_iter()
        .filter(|t| matches!(t.contract_date, Some(d) if d >= from && d <= to))
        .collect()
}
