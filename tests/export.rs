use zorphix_admin::models::Registrant;
use zorphix_admin::services::workbook::{
    export_rows, export_to_workbook, export_to_workbook_named, DEFAULT_FILENAME,
    EXPORT_HEADERS, XLSX_CONTENT_TYPE,
};
use zorphix_admin::services::{ExportError, ExportRow};
use zorphix_admin::test_utils::registrant;
use zorphix_admin::view::{SortField, ViewModel};

#[test]
fn registrant_without_events_exports_placeholders() {
    let row = ExportRow::from(&registrant("x", Some("X"), &[]));

    assert_eq!(
        row,
        ExportRow {
            name: "X".to_string(),
            email: "N/A".to_string(),
            contact_no: "N/A".to_string(),
            college: "N/A".to_string(),
            department: "N/A".to_string(),
            registered_events: "None".to_string(),
        }
    );
}

#[test]
fn events_are_joined_in_registration_order() {
    let mut r = registrant("y", Some("Yamini"), &["Virtuoso", "Xcoders", "Caseathon"]);
    r.email = Some("yamini@college.edu".to_string());
    r.contact_no = Some("9876543210".to_string());
    r.college_name = Some("CEG".to_string());
    r.department = Some("IT".to_string());

    let row = ExportRow::from(&r);
    assert_eq!(
        row.cells(),
        [
            "Yamini",
            "yamini@college.edu",
            "9876543210",
            "CEG",
            "IT",
            "Virtuoso, Xcoders, Caseathon"
        ]
    );
    assert_eq!(EXPORT_HEADERS.len(), row.cells().len());
}

#[test]
fn one_row_per_visible_registrant_in_visible_order() {
    let mut view = ViewModel::new();
    view.set_registrants(vec![
        registrant("b", Some("Bala"), &["Xcoders"]),
        registrant("a", Some("Anu"), &["Xcoders", "Virtuoso"]),
        registrant("c", Some("Chen"), &["Caseathon"]),
    ]);
    view.set_sort_field(SortField::Name);
    view.set_selected_event("Xcoders").expect("catalog event");

    let rows = export_rows(view.visible());
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Anu", "Bala"]);
}

#[test]
fn workbook_is_an_xlsx_archive() {
    let visible: Vec<Registrant> = vec![
        registrant("a", Some("Anu"), &["Xcoders"]),
        registrant("b", None, &[]),
    ];

    let file = export_to_workbook(&visible).expect("workbook");
    assert_eq!(file.filename, DEFAULT_FILENAME);
    assert_eq!(
        file.content_disposition(),
        "attachment; filename=\"users_data.xlsx\""
    );
    // xlsx is a zip container.
    assert!(file.bytes.starts_with(b"PK"), "not a zip archive");
    assert!(XLSX_CONTENT_TYPE.ends_with("spreadsheetml.sheet"));
}

#[test]
fn empty_selection_still_writes_header_row() {
    let file = export_to_workbook(&[]).expect("workbook");
    assert!(file.bytes.starts_with(b"PK"));
}

#[test]
fn custom_file_name_must_be_plain_xlsx() {
    let visible = vec![registrant("a", Some("Anu"), &[])];

    let file = export_to_workbook_named(&visible, "xcoders.xlsx").expect("valid name");
    assert_eq!(file.filename, "xcoders.xlsx");

    for bad in ["", "users.csv", "../users.xlsx", "a\"b.xlsx"] {
        let err = export_to_workbook_named(&visible, bad).expect_err("invalid name");
        assert!(
            matches!(err, ExportError::FileName(ref name) if name == bad),
            "expected FileName error for '{}', got {:?}",
            bad,
            err
        );
    }
}
