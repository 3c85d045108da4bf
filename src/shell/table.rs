use crate::models::registrant::{or_not_available, NOT_AVAILABLE, NO_EVENTS};
use crate::models::Registrant;
use crate::view::{SortField, ViewModel, EVENT_CATALOG};
use serde::Serialize;
use utoipa::ToSchema;

pub const TITLE: &str = "Admin Panel";
pub const TABLE_HEADERS: [&str; 7] = [
    "Name",
    "Email",
    "Contact No",
    "College",
    "Department",
    "Registered Events",
    "No.of.events",
];
pub const EMPTY_TABLE: &str = "No users found matching the current filter.";
pub const ALL_EVENTS_LABEL: &str = "All Events";
pub const DOWNLOAD_LABEL: &str = "Download Excel";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Controls {
    pub sort_label: String,
    pub sort_options: Vec<SelectOption>,
    pub selected_sort: String,
    pub event_label: String,
    pub event_options: Vec<SelectOption>,
    pub selected_event: String,
    pub download_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct TableRow {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub contact_no: String,
    pub college: String,
    pub department: String,
    /// One badge per registered event.
    pub registered_events: Vec<String>,
    /// `"None"` in place of the badges when there are no events.
    pub events_placeholder: Option<String>,
    pub event_count: String,
}

impl From<&Registrant> for TableRow {
    fn from(r: &Registrant) -> Self {
        let count = r.event_count();
        Self {
            uid: r.uid.clone(),
            name: or_not_available(&r.name).to_string(),
            email: or_not_available(&r.email).to_string(),
            contact_no: or_not_available(&r.contact_no).to_string(),
            college: or_not_available(&r.college_name).to_string(),
            department: or_not_available(&r.department).to_string(),
            registered_events: r.event_names().map(str::to_string).collect(),
            events_placeholder: (count == 0).then(|| NO_EVENTS.to_string()),
            event_count: if count == 0 {
                NOT_AVAILABLE.to_string()
            } else {
                count.to_string()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct TableView {
    pub title: String,
    pub controls: Controls,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub empty_placeholder: Option<String>,
}

impl TableView {
    pub fn from_view(view: &ViewModel) -> Self {
        let state = view.view_state();
        let rows: Vec<TableRow> = view.visible().iter().map(TableRow::from).collect();

        let sort_options = SortField::ALL
            .iter()
            .map(|f| SelectOption::new(f.as_str(), f.label()))
            .collect();
        let event_options = std::iter::once(SelectOption::new("", ALL_EVENTS_LABEL))
            .chain(EVENT_CATALOG.iter().map(|e| SelectOption::new(e, e)))
            .collect();

        Self {
            title: TITLE.to_string(),
            controls: Controls {
                sort_label: "Sort by:".to_string(),
                sort_options,
                selected_sort: state.sort_field.as_str().to_string(),
                event_label: "Filter by Event:".to_string(),
                event_options,
                selected_event: state.selected_event.clone(),
                download_label: DOWNLOAD_LABEL.to_string(),
            },
            headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
            empty_placeholder: rows.is_empty().then(|| EMPTY_TABLE.to_string()),
            rows,
        }
    }
}
