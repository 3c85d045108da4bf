use crate::models::Registrant;
use crate::view::catalog::{is_catalog_event, normalize_event_name};
use crate::view::collate::locale_cmp;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("unknown event: {0}")]
    UnknownEvent(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SortField {
    #[default]
    #[serde(rename = "registeredEvents")]
    RegisteredEvents,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "collegeName")]
    CollegeName,
}

impl SortField {
    pub const ALL: [SortField; 3] = [Self::RegisteredEvents, Self::Name, Self::CollegeName];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisteredEvents => "registeredEvents",
            Self::Name => "name",
            Self::CollegeName => "collegeName",
        }
    }

    /// Dropdown label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegisteredEvents => "Total Events Registered",
            Self::Name => "Name",
            Self::CollegeName => "College",
        }
    }
}

impl FromStr for SortField {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ViewError::UnknownSortField(s.to_string()))
    }
}

/// Current dropdown selections. An empty `selected_event` means no filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub sort_field: SortField,
    pub selected_event: String,
}

impl ViewState {
    /// Builds a state from raw control values; `None` keeps the default.
    pub fn parse(sort: Option<&str>, event: Option<&str>) -> Result<Self, ViewError> {
        let mut state = Self::default();
        if let Some(sort) = sort {
            state.sort_field = sort.parse()?;
        }
        if let Some(event) = event {
            validate_event(event)?;
            state.selected_event = event.to_string();
        }
        Ok(state)
    }
}

fn validate_event(event: &str) -> Result<(), ViewError> {
    if event.is_empty() || is_catalog_event(event) {
        Ok(())
    } else {
        Err(ViewError::UnknownEvent(event.to_string()))
    }
}

/// Latest registrant snapshot plus the selections that derive the visible rows.
#[derive(Debug)]
pub struct ViewModel {
    registrants: Vec<Registrant>,
    view_state: ViewState,
    loading: bool,
    visible: Vec<Registrant>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        Self::with_state(ViewState::default())
    }

    pub fn with_state(view_state: ViewState) -> Self {
        Self {
            registrants: Vec::new(),
            view_state,
            loading: true,
            visible: Vec::new(),
        }
    }

    /// Installs a fresh snapshot and ends the loading phase.
    pub fn set_registrants(&mut self, registrants: Vec<Registrant>) {
        self.registrants = registrants;
        self.loading = false;
        self.rederive();
    }

    pub fn set_sort_field(&mut self, sort_field: SortField) {
        self.view_state.sort_field = sort_field;
        self.rederive();
    }

    /// Selects a catalog event, or clears the filter with `""`. Anything else
    /// is rejected and the current selection is kept.
    pub fn set_selected_event(&mut self, event: &str) -> Result<(), ViewError> {
        validate_event(event)?;
        self.view_state.selected_event = event.to_string();
        self.rederive();
        Ok(())
    }

    pub fn visible(&self) -> &[Registrant] {
        &self.visible
    }

    pub fn registrants(&self) -> &[Registrant] {
        &self.registrants
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    fn rederive(&mut self) {
        self.visible = derive_visible(&self.registrants, &self.view_state);
    }
}

/// Filter then stable-sort `registrants` according to `state`.
pub fn derive_visible(registrants: &[Registrant], state: &ViewState) -> Vec<Registrant> {
    let wanted = normalize_event_name(&state.selected_event);
    let mut visible: Vec<Registrant> = registrants
        .iter()
        .filter(|r| state.selected_event.is_empty() || attends(r, &wanted))
        .cloned()
        .collect();

    match state.sort_field {
        SortField::RegisteredEvents => {
            visible.sort_by(|a, b| b.event_count().cmp(&a.event_count()))
        }
        SortField::Name => visible.sort_by(|a, b| locale_cmp(a.name_or_empty(), b.name_or_empty())),
        SortField::CollegeName => {
            visible.sort_by(|a, b| locale_cmp(a.college_or_empty(), b.college_or_empty()))
        }
    }
    visible
}

fn attends(registrant: &Registrant, normalized_event: &str) -> bool {
    registrant
        .event_names()
        .any(|name| normalize_event_name(name) == normalized_event)
}
