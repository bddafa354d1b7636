// src/filter.rs
use crate::fetch::RawRow;

/// A row that passed the district filter, projected into the fixed field
/// set the converter works on. Absent source fields are carried as `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub receipt_year: String,
    pub district: String,
    pub sub_district: String,
    pub main_lot: String,
    pub sub_lot: String,
    pub building_name: String,
    pub contract_day: String,
    pub amount: String,
    pub area: String,
}

/// Retain a row iff its district field contains `district` as a substring
/// and, only when a non-empty `sub_district` is supplied, its sub-district
/// field contains that as a substring too. Missing fields compare as empty
/// strings and are never fatal.
pub fn filter_rows(
    rows: &[RawRow],
    district: &str,
    sub_district: Option<&str>,
) -> Vec<NormalizedRow> {
    rows.iter()
        .filter(|row| {
            let cgg = row.district.as_deref().unwrap_or("");
            let stdg = row.sub_district.as_deref().unwrap_or("");
            if !cgg.contains(district) {
                return false;
            }
            match sub_district {
                Some(dong) if !dong.is_empty() => stdg.contains(dong),
                _ => true,
            }
        })
        .map(normalize)
        .collect()
}

fn normalize(row: &RawRow) -> NormalizedRow {
    NormalizedRow {
        receipt_year: or_empty(&row.receipt_year),
        district: or_empty(&row.district),
        sub_district: or_empty(&row.sub_district),
        main_lot: or_empty(&row.main_lot),
        sub_lot: or_empty(&row.sub_lot),
        building_name: or_empty(&row.building_name),
        contract_day: or_empty(&row.contract_day),
        amount: or_empty(&row.amount),
        area: or_empty(&row.area),
    }
}

fn or_empty(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}
