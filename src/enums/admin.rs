use crate::shell::TableView;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// `registeredEvents` (default), `name` or `collegeName`.
    pub sort: Option<String>,
    /// A catalog event name; empty or absent shows everyone.
    pub event: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub status: String,
    pub data: Option<TableView>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ExportErrorResponse {
    pub status: String,
    pub error: Option<String>,
}
