mod api;
mod components;
mod platform;
mod state;
mod storage;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use notesync::route::Page;

use components::assistant::AssistantWidget;
use components::auth::AuthPage;
use components::dashboard::Dashboard;
use components::landing::LandingPage;
use components::profile::ProfilePage;
use platform::Platform;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    platform::provide_platform(Platform::detect());
    let state = AppState::provide();

    view! {
        <div class="app-container">
            {move || match state.page.get() {
                Page::Landing => view! { <LandingPage /> }.into_any(),
                Page::Auth => view! { <AuthPage /> }.into_any(),
                Page::Dashboard => view! { <Dashboard /> }.into_any(),
                Page::Profile => view! { <ProfilePage /> }.into_any(),
            }}
            <AssistantWidget />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
