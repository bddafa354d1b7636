// src/fetch/xml.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// One `<row>` element of the open API response, decoded field by field.
/// A tag that is absent from the element stays `None`; an empty tag decodes
/// to `Some("")`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub receipt_year: Option<String>,
    pub district: Option<String>,
    pub sub_district: Option<String>,
    pub main_lot: Option<String>,
    pub sub_lot: Option<String>,
    pub building_name: Option<String>,
    pub contract_day: Option<String>,
    pub amount: Option<String>,
    pub area: Option<String>,
}

struct Tags {
    row: Selector,
    receipt_year: Selector,
    district: Selector,
    sub_district: Selector,
    main_lot: Selector,
    sub_lot: Selector,
    building_name: Selector,
    contract_day: Selector,
    amount: Selector,
    area: Selector,
}

// The lenient tree builder lowercases tag names, so the selectors match the
// lowercased form of the provider's field tags.
static TAGS: Lazy<Tags> = Lazy::new(|| Tags {
    row: tag("row"),
    receipt_year: tag("rcpt_yr"),
    district: tag("cgg_nm"),
    sub_district: tag("stdg_nm"),
    main_lot: tag("mno"),
    sub_lot: tag("sno"),
    building_name: tag("bldg_nm"),
    contract_day: tag("ctrt_day"),
    amount: tag("thing_amt"),
    area: tag("arch_area"),
});

fn tag(name: &str) -> Selector {
    Selector::parse(name).expect("invalid field tag selector")
}

/// Decode every `<row>` element found in `body`. Malformed markup and
/// missing fields never fail; a body without rows yields an empty vec.
pub fn decode_rows(body: &str) -> Vec<RawRow> {
    let doc = Html::parse_document(body);
    doc.select(&TAGS.row)
        .map(|row| RawRow {
            receipt_year: field_text(row, &TAGS.receipt_year),
            district: field_text(row, &TAGS.district),
            sub_district: field_text(row, &TAGS.sub_district),
            main_lot: field_text(row, &TAGS.main_lot),
            sub_lot: field_text(row, &TAGS.sub_lot),
            building_name: field_text(row, &TAGS.building_name),
            contract_day: field_text(row, &TAGS.contract_day),
            amount: field_text(row, &TAGS.amount),
            area: field_text(row, &TAGS.area),
        })
        .collect()
}

fn field_text(row: ElementRef, field: &Selector) -> Option<String> {
    row.select(field)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tbLnOpendataRtmsV>
  <list_total_count>2</list_total_count>
  <RESULT><CODE>INFO-000</CODE><MESSAGE>정상 처리되었습니다</MESSAGE></RESULT>
  <row>
    <RCPT_YR>2023</RCPT_YR>
    <CGG_NM>강서구</CGG_NM>
    <STDG_NM>화곡동</STDG_NM>
    <MNO>1056</MNO>
    <SNO>0000</SNO>
    <BLDG_NM>우장산아파트</BLDG_NM>
    <CTRT_DAY>20230415</CTRT_DAY>
    <THING_AMT>52000</THING_AMT>
    <ARCH_AREA>84.95</ARCH_AREA>
  </row>
  <row>
    <RCPT_YR>2023</RCPT_YR>
    <CGG_NM>강서구</CGG_NM>
    <STDG_NM>등촌동</STDG_NM>
    <MNO>635</MNO>
    <CTRT_DAY>20230501</CTRT_DAY>
    <THING_AMT>31500</THING_AMT>
  </row>
</tbLnOpendataRtmsV>"#;

    #[test]
    fn decodes_every_row() {
        let rows = decode_rows(SAMPLE);
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.receipt_year.as_deref(), Some("2023"));
        assert_eq!(first.district.as_deref(), Some("강서구"));
        assert_eq!(first.sub_district.as_deref(), Some("화곡동"));
        assert_eq!(first.main_lot.as_deref(), Some("1056"));
        assert_eq!(first.sub_lot.as_deref(), Some("0000"));
        assert_eq!(first.building_name.as_deref(), Some("우장산아파트"));
        assert_eq!(first.contract_day.as_deref(), Some("20230415"));
        assert_eq!(first.amount.as_deref(), Some("52000"));
        assert_eq!(first.area.as_deref(), Some("84.95"));
    }

    #[test]
    fn missing_tags_stay_none() {
        let rows = decode_rows(SAMPLE);
        let second = &rows[1];
        assert_eq!(second.sub_lot, None);
        assert_eq!(second.building_name, None);
        assert_eq!(second.area, None);
        assert_eq!(second.amount.as_deref(), Some("31500"));
    }

    #[test]
    fn rowless_bodies_decode_to_empty() {
        assert!(decode_rows("").is_empty());
        assert!(decode_rows("<RESULT><CODE>ERROR-500</CODE></RESULT>").is_empty());
        assert!(decode_rows("not xml at all").is_empty());
    }
}
