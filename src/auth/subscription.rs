use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Receives the signed-in principal id, or `None` after sign-out.
pub type AuthCallback = Box<dyn Fn(Option<&str>) + Send + Sync>;

type Listener = Arc<dyn Fn(Option<&str>) + Send + Sync>;

#[derive(Default)]
struct HubInner {
    // None until the first resolution.
    current: Option<Option<String>>,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Fan-out of auth-state changes to subscribed callbacks.
///
/// A subscriber registered after the first resolution is called back
/// immediately with the current principal, so late subscribers never miss
/// the initial state.
#[derive(Clone, Default)]
pub struct AuthStateHub {
    inner: Arc<Mutex<HubInner>>,
}

impl AuthStateHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let listener: Listener = Arc::from(callback);
        let (id, current) = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.current.clone())
        };
        if let Some(principal) = current {
            listener(principal.as_deref());
        }
        Subscription {
            hub: Arc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Records a new principal (or sign-out) and notifies every subscriber.
    pub fn publish(&self, principal: Option<String>) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.lock();
            inner.current = Some(principal.clone());
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(principal.as_deref());
        }
    }

    /// `None` while unresolved, `Some(None)` when signed out.
    pub fn current(&self) -> Option<Option<String>> {
        self.inner.lock().current.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

/// Teardown handle for an auth-state subscription; dropping it unsubscribes.
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    id: Option<u64>,
}

impl Subscription {
    /// A handle bound to no hub; never active.
    pub fn detached() -> Self {
        Self {
            hub: Weak::new(),
            id: None,
        }
    }

    pub fn unsubscribe(mut self) {
        self.detach();
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.hub.strong_count() > 0
    }

    fn detach(&mut self) {
        if let (Some(id), Some(hub)) = (self.id.take(), self.hub.upgrade()) {
            hub.lock().listeners.retain(|(lid, _)| *lid != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
