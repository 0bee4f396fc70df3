use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use notesync::models::{RegisterRequest, Severity};
use notesync::route::Route;

use crate::api;
use crate::state::AppState;

/// Combined sign-in / registration form.
#[component]
pub fn AuthPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (is_login, set_is_login) = signal(true);
    let (show_password, set_show_password) = signal(false);
    let (message, set_message) = signal(None::<String>);
    let (shake, set_shake) = signal(false);
    let form = RwSignal::new(RegisterRequest::default());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let request = form.get_untracked();
        let login_mode = is_login.get_untracked();

        spawn_local(async move {
            let outcome = if login_mode {
                api::login(&request.login()).await
            } else {
                api::register(&request).await
            };

            match outcome {
                Ok(body) => {
                    set_message.set(Some(body));
                    if login_mode {
                        state.sign_in(request.username);
                        state.navigate(Route::Dashboard(None));
                    } else {
                        set_is_login.set(true);
                    }
                }
                Err(e) => {
                    log::error!("Auth request failed: {e}");
                    let text = e
                        .response_body()
                        .map(str::to_string)
                        .unwrap_or_else(|| "An error occurred".to_string());
                    set_message.set(Some(text));
                    set_shake.set(true);
                    Timeout::new(500, move || set_shake.set(false)).forget();
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" class:shake=move || shake.get() on:submit=on_submit>
                <h1>{move || if is_login.get() { "Welcome Back!" } else { "Create Account" }}</h1>

                <label class="field">
                    <span>"Username"</span>
                    <input
                        type="text"
                        name="username"
                        required
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                </label>

                <label class="field">
                    <span>"Password"</span>
                    <div class="password-row">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            name="password"
                            required
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="icon-button"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "🙈" } else { "👁" }}
                        </button>
                    </div>
                </label>

                <Show when=move || !is_login.get()>
                    <label class="field">
                        <span>"Full Name"</span>
                        <input
                            type="text"
                            name="fullName"
                            prop:value=move || form.with(|f| f.full_name.clone())
                            on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Email"</span>
                        <input
                            type="email"
                            name="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Phone Number"</span>
                        <input
                            type="text"
                            name="phoneNumber"
                            prop:value=move || form.with(|f| f.phone_number.clone())
                            on:input=move |ev| {
                                form.update(|f| f.phone_number = event_target_value(&ev))
                            }
                        />
                    </label>
                </Show>

                {move || {
                    message.get().map(|msg| {
                        let class = Severity::of_auth_message(&msg).css_class();
                        view! { <div class=class>{msg}</div> }
                    })
                }}

                <button type="submit" class="primary-btn">
                    {move || if is_login.get() { "Sign In" } else { "Create Account" }}
                </button>
                <button
                    type="button"
                    class="text-btn"
                    on:click=move |_| set_is_login.update(|v| *v = !*v)
                >
                    {move || {
                        if is_login.get() {
                            "Don't have an account? Sign Up"
                        } else {
                            "Already have an account? Sign In"
                        }
                    }}
                </button>
            </form>
        </div>
    }
}
