// src/aggregate.rs
use std::collections::BTreeMap;

use chrono::Datelike;

use crate::convert::Transaction;

/// Headline figures for the current table. Means over an empty table are
/// reported as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_amount: f64,
    pub mean_unit_price: f64,
}

pub fn summarize(rows: &[Transaction]) -> Summary {
    Summary {
        count: rows.len(),
        mean_amount: mean(rows.iter().filter_map(|t| t.amount)),
        mean_unit_price: mean(rows.iter().filter_map(|t| t.unit_price)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Mean unit price per (year, month) of the contract date, ordered by
/// month. Rows missing the date or the unit price are ignored.
pub fn monthly_mean_unit_price(rows: &[Transaction]) -> Vec<((i32, u32), f64)> {
    let mut groups: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for t in rows {
        if let (Some(date), Some(unit_price)) = (t.contract_date, t.unit_price) {
            let entry = groups.entry((date.year(), date.month())).or_insert((0.0, 0));
            entry.0 += unit_price;
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(month, (sum, n))| (month, sum / n as f64))
        .collect()
}

/// The `n` highest-amount transactions, descending. The sort is stable, so
/// equal amounts keep their original relative order; rows without an amount
/// are excluded.
pub fn top_by_amount(rows: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut priced: Vec<&Transaction> = rows.iter().filter(|t| t.amount.is_some()).collect();
    priced.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    priced.truncate(n);
    priced
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(name: &str, amount: Option<f64>, unit_price: Option<f64>, date: Option<NaiveDate>) -> Transaction {
        Transaction {
            receipt_year: String::new(),
            district: String::new(),
            sub_district: String::new(),
            main_lot: String::new(),
            sub_lot: String::new(),
            building_name: name.to_string(),
            contract_date: date,
            amount,
            area: None,
            unit_price,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn top_selection_is_stable_on_ties() {
        let rows = vec![
            tx("a", Some(100.0), None, None),
            tx("b", Some(900.0), None, None),
            tx("c", Some(500.0), None, None),
            tx("d", Some(900.0), None, None),
            tx("e", Some(300.0), None, None),
        ];
        let top: Vec<&str> = top_by_amount(&rows, 5)
            .iter()
            .map(|t| t.building_name.as_str())
            .collect();
        assert_eq!(top, vec!["b", "d", "c", "e", "a"]);

        let top3: Vec<&str> = top_by_amount(&rows, 3)
            .iter()
            .map(|t| t.building_name.as_str())
            .collect();
        assert_eq!(top3, vec!["b", "d", "c"]);
    }

    #[test]
    fn top_skips_rows_without_an_amount() {
        let rows = vec![tx("a", None, None, None), tx("b", Some(10.0), None, None)];
        let top = top_by_amount(&rows, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].building_name, "b");
    }

    #[test]
    fn monthly_mean_groups_by_contract_month() {
        let rows = vec![
            tx("a", None, Some(1000.0), day(2023, 4, 3)),
            tx("b", None, Some(2000.0), day(2023, 4, 28)),
            tx("c", None, Some(700.0), day(2023, 5, 1)),
            tx("d", None, None, day(2023, 5, 2)),
            tx("e", None, Some(999.0), None),
        ];
        let monthly = monthly_mean_unit_price(&rows);
        assert_eq!(monthly, vec![((2023, 4), 1500.0), ((2023, 5), 700.0)]);
    }

    #[test]
    fn summary_means_ignore_absent_fields() {
        let rows = vec![
            tx("a", Some(100.0), Some(10.0), None),
            tx("b", Some(300.0), None, None),
            tx("c", None, Some(20.0), None),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean_amount, 200.0);
        assert_eq!(summary.mean_unit_price, 15.0);
    }

    #[test]
    fn empty_table_summarizes_to_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_amount, 0.0);
        assert_eq!(summary.mean_unit_price, 0.0);
        assert!(monthly_mean_unit_price(&[]).is_empty());
        assert!(top_by_amount(&[], 5).is_empty());
    }
}
