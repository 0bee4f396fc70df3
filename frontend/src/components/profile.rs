use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use notesync::models::{Severity, UserProfile};
use notesync::route::Route;

use crate::api;
use crate::state::AppState;

const UPDATED_MESSAGE: &str = "Profile updated successfully";
const UPDATE_FAILED_MESSAGE: &str = "Error updating profile";

/// View and edit the signed-in user's details.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let profile = RwSignal::new(UserProfile::default());
    let (message, set_message) = signal(None::<&'static str>);

    Effect::new(move |_| {
        let Some(username) = state.username.get() else {
            log::warn!("profile opened without a signed-in user");
            return;
        };
        spawn_local(async move {
            match api::fetch_profile(&username).await {
                Ok(loaded) => profile.set(loaded),
                Err(e) => log::error!("Error fetching user data: {e}"),
            }
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let draft = profile.get_untracked();
        spawn_local(async move {
            match api::update_profile(&draft).await {
                Ok(saved) => {
                    profile.set(saved);
                    set_message.set(Some(UPDATED_MESSAGE));
                }
                Err(e) => {
                    log::error!("Error updating profile: {e}");
                    set_message.set(Some(UPDATE_FAILED_MESSAGE));
                }
            }
        });
    };

    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    let non_empty = |value: String| (!value.is_empty()).then_some(value);

    view! {
        <div class="profile-page">
            <form class="profile-card" on:submit=on_submit>
                <div class="profile-header">
                    <button
                        type="button"
                        class="text-btn"
                        on:click=move |_| state.navigate(Route::Dashboard(None))
                    >
                        "← Back to Dashboard"
                    </button>
                    <h1>"User Profile"</h1>
                </div>

                {move || {
                    message.get().map(|msg| {
                        let class = Severity::of_profile_message(msg).css_class();
                        view! { <div class=class>{msg}</div> }
                    })
                }}

                <label class="field">
                    <span>"Username"</span>
                    <input
                        type="text"
                        readonly
                        prop:value=move || profile.with(|p| p.username.clone())
                    />
                </label>
                <label class="field">
                    <span>"Full Name"</span>
                    <input
                        type="text"
                        prop:value=move || profile.with(|p| optional(&p.full_name))
                        on:input=move |ev| {
                            profile.update(|p| p.full_name = non_empty(event_target_value(&ev)))
                        }
                    />
                </label>
                <label class="field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        prop:value=move || profile.with(|p| optional(&p.email))
                        on:input=move |ev| {
                            profile.update(|p| p.email = non_empty(event_target_value(&ev)))
                        }
                    />
                </label>
                <label class="field">
                    <span>"Phone Number"</span>
                    <input
                        type="text"
                        prop:value=move || profile.with(|p| optional(&p.phone_number))
                        on:input=move |ev| {
                            profile.update(|p| p.phone_number = non_empty(event_target_value(&ev)))
                        }
                    />
                </label>
                <label class="field">
                    <span>"New Password"</span>
                    <input
                        type="password"
                        placeholder="Leave blank to keep the current password"
                        prop:value=move || profile.with(|p| optional(&p.password))
                        on:input=move |ev| {
                            profile.update(|p| p.password = non_empty(event_target_value(&ev)))
                        }
                    />
                </label>

                <button type="submit" class="primary-btn">"Update Profile"</button>
            </form>
        </div>
    }
}
