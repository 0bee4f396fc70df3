use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use notesync::notes::USERNAME_KEY;
use notesync::route::{Page, Route};

use crate::storage;

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub route: ReadSignal<Route>,
    pub page: Memo<Page>,
    pub username: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    set_route: WriteSignal<Route>,
    set_username: WriteSignal<Option<String>>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (route, set_route) = signal(current_route());
        let page = Memo::new(move |_| route.get().page());
        let (username, set_username) = signal(storage::load(USERNAME_KEY));

        // Back/forward buttons
        let _ = window_event_listener(ev::popstate, move |_| {
            set_route.set(current_route());
        });

        let state = Self { route, page, username, set_route, set_username };
        provide_context(state);
        state
    }

    /// Show `route` and record it in the browser history.
    pub fn navigate(&self, route: Route) {
        if self.route.get_untracked() == route {
            return;
        }
        let path = route.path();
        if let Ok(history) = window().history() {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&path)) {
                log::warn!("Failed to push history entry {path}: {e:?}");
            }
        }
        log::debug!("navigate to {path}");
        self.set_route.set(route);
    }

    /// Remember the signed-in user across reloads.
    pub fn sign_in(&self, username: String) {
        storage::store(USERNAME_KEY, &username);
        self.set_username.set(Some(username));
    }
}

fn current_route() -> Route {
    match window().location().pathname() {
        Ok(path) => Route::from_path(&path),
        Err(e) => {
            log::warn!("Failed to read location: {e:?}");
            Route::Landing
        }
    }
}
