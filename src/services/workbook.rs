use crate::models::registrant::{or_not_available, NO_EVENTS};
use crate::models::Registrant;
use log::debug;
use rust_xlsxwriter::{Workbook, XlsxError};

pub const DEFAULT_FILENAME: &str = "users_data.xlsx";
pub const SHEET_NAME: &str = "Users";
pub const EXPORT_HEADERS: [&str; 6] = [
    "Name",
    "Email",
    "Contact No",
    "College",
    "Department",
    "Registered Events",
];
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("workbook error: {0}")]
    Workbook(#[from] XlsxError),
    #[error("invalid workbook file name: '{0}'")]
    FileName(String),
}

/// One spreadsheet row, with placeholders already substituted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub email: String,
    pub contact_no: String,
    pub college: String,
    pub department: String,
    pub registered_events: String,
}

impl From<&Registrant> for ExportRow {
    fn from(r: &Registrant) -> Self {
        let events = r.event_names().collect::<Vec<_>>().join(", ");
        Self {
            name: or_not_available(&r.name).to_string(),
            email: or_not_available(&r.email).to_string(),
            contact_no: or_not_available(&r.contact_no).to_string(),
            college: or_not_available(&r.college_name).to_string(),
            department: or_not_available(&r.department).to_string(),
            registered_events: if events.is_empty() {
                NO_EVENTS.to_string()
            } else {
                events
            },
        }
    }
}

impl ExportRow {
    /// Cell values in [`EXPORT_HEADERS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.contact_no.as_str(),
            self.college.as_str(),
            self.department.as_str(),
            self.registered_events.as_str(),
        ]
    }
}

/// A finished workbook ready to be offered for download.
#[derive(Clone, Debug)]
pub struct WorkbookFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl WorkbookFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub fn export_rows(visible: &[Registrant]) -> Vec<ExportRow> {
    visible.iter().map(ExportRow::from).collect()
}

pub fn export_to_workbook(visible: &[Registrant]) -> Result<WorkbookFile, ExportError> {
    export_to_workbook_named(visible, DEFAULT_FILENAME)
}

pub fn export_to_workbook_named(
    visible: &[Registrant],
    filename: &str,
) -> Result<WorkbookFile, ExportError> {
    let invalid = filename.trim().is_empty()
        || !filename.ends_with(".xlsx")
        || filename.contains(['/', '\\', '"']);
    if invalid {
        return Err(ExportError::FileName(filename.to_string()));
    }

    let rows = export_rows(visible);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            sheet.write_string(row_num, col as u16, *cell)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(
        "export_to_workbook: wrote {} rows to '{}' ({} bytes)",
        rows.len(),
        filename,
        bytes.len()
    );
    Ok(WorkbookFile {
        filename: filename.to_string(),
        bytes,
    })
}
