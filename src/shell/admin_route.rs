use crate::auth::identity::Authenticator;
use crate::auth::principal::AuthState;
use crate::auth::probe::IdentityProbe;
use crate::auth::subscription::{AuthCallback, Subscription};
use crate::db::RegistrantOperations;
use crate::models::Registrant;
use crate::services::workbook::{export_to_workbook, ExportError, WorkbookFile};
use crate::shell::{Route, Screen, TableView};
use crate::view::{SortField, ViewError, ViewModel};
use log::{debug, error, info};
use tokio::sync::mpsc;

/// The admin-gated view. Auth changes arrive through a subscription and are
/// applied in order by [`settle`](Self::settle) or
/// [`next_change`](Self::next_change); the registrant fetch starts only once
/// an admin principal is observed, and at most once per mount.
pub struct AdminRoute {
    probe: IdentityProbe,
    registrants: RegistrantOperations,
    changes: Option<mpsc::UnboundedReceiver<Option<String>>>,
    subscription: Option<Subscription>,
    auth_state: AuthState,
    fetch_started: bool,
    view: ViewModel,
    navigation: Option<Route>,
}

impl AdminRoute {
    pub fn mount(
        authenticator: &dyn Authenticator,
        probe: IdentityProbe,
        registrants: RegistrantOperations,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let on_change: AuthCallback = Box::new(move |principal: Option<&str>| {
            // Receiver gone means the route unmounted.
            let _ = tx.send(principal.map(str::to_string));
        });
        let subscription = authenticator.subscribe_auth_state(on_change);
        Self {
            probe,
            registrants,
            changes: Some(rx),
            subscription: Some(subscription),
            auth_state: AuthState::Unknown,
            fetch_started: false,
            view: ViewModel::new(),
            navigation: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Applies every auth change delivered so far and returns how many there were.
    pub async fn settle(&mut self) -> usize {
        let mut applied = 0;
        while let Some(principal) = self.changes.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.apply_auth_change(principal).await;
            applied += 1;
        }
        applied
    }

    /// Waits for the next auth change and applies it. `None` once unmounted.
    pub async fn next_change(&mut self) -> Option<AuthState> {
        let principal = self.changes.as_mut()?.recv().await?;
        self.apply_auth_change(principal).await;
        Some(self.auth_state)
    }

    /// Tears down the auth subscription. Later changes and fetch results are ignored.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!("admin route: unmounted");
        }
        self.changes = None;
    }

    /// Pending navigation derived from the last auth transition.
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn render(&self) -> Screen {
        match self.auth_state {
            AuthState::Unknown => Screen::CheckingPermissions,
            AuthState::Unauthenticated | AuthState::AuthenticatedNonAdmin => {
                Screen::Redirecting(Route::Login)
            }
            AuthState::AuthenticatedAdmin if self.view.loading() => Screen::Loading,
            AuthState::AuthenticatedAdmin => Screen::Dashboard(TableView::from_view(&self.view)),
        }
    }

    pub fn set_sort_field(&mut self, sort_field: SortField) {
        self.view.set_sort_field(sort_field);
    }

    pub fn set_selected_event(&mut self, event: &str) -> Result<(), ViewError> {
        self.view.set_selected_event(event)
    }

    /// Workbook of the rows currently visible.
    pub fn export(&self) -> Result<WorkbookFile, ExportError> {
        export_to_workbook(self.view.visible())
    }

    async fn apply_auth_change(&mut self, principal: Option<String>) {
        if !self.is_mounted() {
            return;
        }
        let Some(uid) = principal else {
            info!("admin route: signed out, redirecting to {}", Route::Login.path());
            self.transition(AuthState::Unauthenticated);
            return;
        };

        let is_admin = self.probe.is_admin(&uid).await;
        self.transition(AuthState::signed_in(is_admin));
        if is_admin {
            self.load_registrants().await;
        } else {
            info!("admin route: '{}' lacks admin capability", uid);
        }
    }

    fn transition(&mut self, next: AuthState) {
        self.auth_state = next;
        self.navigation = match next {
            AuthState::Unauthenticated | AuthState::AuthenticatedNonAdmin => Some(Route::Login),
            AuthState::Unknown | AuthState::AuthenticatedAdmin => None,
        };
    }

    async fn load_registrants(&mut self) {
        if self.fetch_started {
            return;
        }
        self.fetch_started = true;
        let snapshot = match self.registrants.list_registrants().await {
            Ok(registrants) => registrants,
            Err(e) => {
                error!("admin route: showing empty table: {}", e);
                Vec::new()
            }
        };
        self.install_snapshot(snapshot);
    }

    fn install_snapshot(&mut self, snapshot: Vec<Registrant>) {
        if !self.is_mounted() {
            debug!("admin route: discarding {} registrants after unmount", snapshot.len());
            return;
        }
        self.view.set_registrants(snapshot);
    }
}
