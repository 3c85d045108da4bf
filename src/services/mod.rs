pub mod sign_in;
pub mod workbook;

pub use sign_in::{SignInError, SignInFlow, SignInState};
pub use workbook::{export_to_workbook, ExportError, ExportRow, WorkbookFile};
