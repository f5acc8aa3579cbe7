use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use pushkind_leads::domain::lead::{Lead, LeadField};
use pushkind_leads::domain::listing::{LeadFilter, SortConfig, SortDirection, visible_leads};
use pushkind_leads::export::{SHEET_NAME, export_leads};

fn sample() -> Vec<Lead> {
    serde_json::from_value(serde_json::json!([
        {"name": "A", "address": "Jl. Merdeka 1", "website": "w", "phone": null, "rating": "4.5", "reviews": "10"},
        {"name": "B", "address": "Jl. Asia Afrika 2", "website": null, "phone": "0811", "rating": "3.0", "reviews": "50"}
    ]))
    .unwrap()
}

fn read_back(bytes: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

#[test]
fn test_export_writes_visible_rows_in_view_order() {
    let leads = sample();
    let sort = SortConfig::new(LeadField::Reviews, SortDirection::Desc);
    let visible = visible_leads(&leads, &LeadFilter::default(), Some(&sort));

    let rows = read_back(export_leads(&visible).unwrap());

    assert_eq!(
        rows[0],
        ["name", "address", "phone", "website", "rating", "reviews"]
            .map(|h| Data::String(h.to_string()))
            .to_vec()
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], Data::String("B".into()));
    assert_eq!(rows[1][2], Data::String("0811".into()));
    assert_eq!(rows[1][3], Data::Empty);
    assert_eq!(rows[1][5], Data::Float(50.0));
    assert_eq!(rows[2][0], Data::String("A".into()));
    assert_eq!(rows[2][4], Data::Float(4.5));
}

#[test]
fn test_export_respects_filter() {
    let leads = sample();
    let filter = LeadFilter {
        has_website: true,
        has_phone: false,
    };
    let visible = visible_leads(&leads, &filter, None);

    let rows = read_back(export_leads(&visible).unwrap());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], Data::String("A".into()));
}
