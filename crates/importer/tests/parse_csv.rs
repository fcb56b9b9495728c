use core_types::NewSalesRecord;
use importer::{parse_sales_csv, ImportError};
use pretty_assertions::assert_eq;

fn new_record(date: &str, product: &str, quantity: i64) -> NewSalesRecord {
    NewSalesRecord {
        date: date.to_string(),
        product: product.to_string(),
        quantity,
    }
}

#[test]
fn parses_a_well_formed_upload() {
    let csv = "date,product,quantity\n01/03/2024,tea,3\n02/03/2024,coffee,5\n";
    let upload = parse_sales_csv(csv.as_bytes()).unwrap();

    assert_eq!(
        upload.records,
        vec![
            new_record("01/03/2024", "tea", 3),
            new_record("02/03/2024", "coffee", 5)
        ]
    );
    assert_eq!(upload.rows_read, 2);
    assert_eq!(upload.rows_skipped, 0);
    assert_eq!(upload.unparseable_dates, 0);
}

#[test]
fn header_matching_ignores_order_case_and_extra_columns() {
    let csv = "Quantity , store, PRODUCT,Date\n7,north,tea,2024-03-01\n";
    let upload = parse_sales_csv(csv.as_bytes()).unwrap();

    assert_eq!(upload.records, vec![new_record("2024-03-01", "tea", 7)]);
}

#[test]
fn missing_columns_report_what_was_found() {
    let csv = "day,product,amount\n01/03/2024,tea,3\n";
    let err = parse_sales_csv(csv.as_bytes()).unwrap_err();

    match err {
        ImportError::MissingColumns { required, found } => {
            assert_eq!(required, vec!["date", "product", "quantity"]);
            assert_eq!(found, vec!["day", "product", "amount"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn invalid_rows_are_skipped_and_counted() {
    let csv = "date,product,quantity\n\
               01/03/2024,tea,3\n\
               02/03/2024,,4\n\
               03/03/2024,tea,-2\n\
               04/03/2024,tea,lots\n\
               05/03/2024,tea\n\
               06/03/2024,coffee,1.0\n";
    let upload = parse_sales_csv(csv.as_bytes()).unwrap();

    assert_eq!(upload.rows_read, 6);
    assert_eq!(upload.rows_skipped, 4);
    assert_eq!(
        upload.records,
        vec![
            new_record("01/03/2024", "tea", 3),
            new_record("06/03/2024", "coffee", 1)
        ]
    );
}

#[test]
fn unparseable_dates_are_kept_but_counted() {
    let csv = "date,product,quantity\nsometime,tea,3\n01/03/2024,tea,1\n";
    let upload = parse_sales_csv(csv.as_bytes()).unwrap();

    assert_eq!(upload.records.len(), 2);
    assert_eq!(upload.unparseable_dates, 1);
}

#[test]
fn header_only_file_yields_no_records() {
    let upload = parse_sales_csv("date,product,quantity\n".as_bytes()).unwrap();
    assert!(upload.records.is_empty());
    assert_eq!(upload.rows_read, 0);
}
