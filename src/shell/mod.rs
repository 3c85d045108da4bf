//! Headless presentation layer: render models for the two screens and the
//! auth-driven admin route. Nothing here draws; callers turn a [`Screen`]
//! into whatever their surface needs.

pub mod admin_route;
pub mod login;
pub mod table;

pub use admin_route::AdminRoute;
pub use login::LoginScreen;
pub use table::{Controls, SelectOption, TableRow, TableView};

pub const CHECKING_PERMISSIONS: &str = "Checking admin permissions...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Admin => "/",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Auth state not resolved yet.
    CheckingPermissions,
    /// The route is navigating away and draws nothing.
    Redirecting(Route),
    /// Admin confirmed, registrants still loading.
    Loading,
    Dashboard(TableView),
}

impl Screen {
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            Screen::CheckingPermissions => Some(CHECKING_PERMISSIONS),
            _ => None,
        }
    }
}
