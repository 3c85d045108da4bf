use crate::db::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Placeholder shown for an absent display field.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder shown for a registrant with no registered events.
pub const NO_EVENTS: &str = "None";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisteredEvent {
    pub name: String,
}

/// A user record as the admin view consumes it. Every display field is
/// optional; an empty string in the store counts as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub uid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub registered_events: Vec<RegisteredEvent>,
}

impl Registrant {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Self::default()
        }
    }

    /// Maps a store document onto the closed registrant schema. The `uid`
    /// field wins over the document id when both are present.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: display_text(doc.get("uid")).unwrap_or_else(|| doc.id.clone()),
            name: display_text(doc.get("name")),
            email: display_text(doc.get("email")),
            contact_no: display_text(doc.get("contactNo")),
            college_name: display_text(doc.get("collegeName")),
            department: display_text(doc.get("department")),
            registered_events: registered_events(doc.get("registeredEvents")),
        }
    }

    pub fn event_count(&self) -> usize {
        self.registered_events.len()
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.registered_events.iter().map(|e| e.name.as_str())
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn college_or_empty(&self) -> &str {
        self.college_name.as_deref().unwrap_or_default()
    }
}

/// `value` as shown in the table, or `"N/A"`.
pub fn or_not_available(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn registered_events(value: Option<&Value>) -> Vec<RegisteredEvent> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| RegisteredEvent {
            name: entry
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}
