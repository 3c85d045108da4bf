use crate::auth::AdminPrincipal;
use crate::enums::admin::{DashboardQuery, DashboardResponse, ExportErrorResponse};
use crate::services::workbook::{export_to_workbook, XLSX_CONTENT_TYPE};
use crate::shell::TableView;
use crate::view::{ViewError, ViewModel, ViewState};
use crate::AppState;
use actix_web::http::header;
use actix_web::{get, web, HttpResponse, Responder};
use log::{debug, error};

/// Selections are validated before the store is read.
async fn load_view(state: &AppState, query: &DashboardQuery) -> Result<ViewModel, ViewError> {
    let view_state = ViewState::parse(query.sort.as_deref(), query.event.as_deref())?;
    let mut view = ViewModel::with_state(view_state);
    view.set_registrants(state.registrant_ops().list_registrants_or_empty().await);
    Ok(view)
}

#[utoipa::path(
    tag = "Admin",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Registrant table for the current selections", body = DashboardResponse),
        (status = 303, description = "Not signed in as an admin; redirected to /login"),
        (status = 400, description = "Unknown sort field or event", body = DashboardResponse)
    ),
    summary = "Render the admin dashboard"
)]
#[get("/")]
pub(crate) async fn dashboard(
    state: web::Data<AppState>,
    admin: AdminPrincipal,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    match load_view(&state, &query).await {
        Ok(view) => {
            debug!(
                "dashboard: rendering {} of {} registrants for '{}'",
                view.visible().len(),
                view.registrants().len(),
                admin.0.uid
            );
            HttpResponse::Ok().json(DashboardResponse {
                status: "ok".to_string(),
                data: Some(TableView::from_view(&view)),
                error: None,
            })
        }
        Err(e) => {
            error!("dashboard: invalid selection from '{}': {}", admin.0.uid, e);
            HttpResponse::BadRequest().json(DashboardResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Admin",
    params(DashboardQuery),
    responses(
        (status = 200, description = "users_data.xlsx containing the visible registrants"),
        (status = 303, description = "Not signed in as an admin; redirected to /login"),
        (status = 400, description = "Unknown sort field or event", body = ExportErrorResponse),
        (status = 500, description = "Workbook could not be written", body = ExportErrorResponse)
    ),
    summary = "Download the visible registrants as a spreadsheet"
)]
#[get("/export")]
pub(crate) async fn export_workbook(
    state: web::Data<AppState>,
    admin: AdminPrincipal,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    let view = match load_view(&state, &query).await {
        Ok(view) => view,
        Err(e) => {
            error!("export_workbook: invalid selection from '{}': {}", admin.0.uid, e);
            return HttpResponse::BadRequest().json(ExportErrorResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            });
        }
    };

    match export_to_workbook(view.visible()) {
        Ok(file) => {
            debug!(
                "export_workbook: sending '{}' with {} rows to '{}'",
                file.filename,
                view.visible().len(),
                admin.0.uid
            );
            HttpResponse::Ok()
                .content_type(XLSX_CONTENT_TYPE)
                .insert_header((header::CONTENT_DISPOSITION, file.content_disposition()))
                .body(file.bytes)
        }
        Err(e) => {
            error!("export_workbook: failed to build workbook: {}", e);
            HttpResponse::InternalServerError().json(ExportErrorResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}
