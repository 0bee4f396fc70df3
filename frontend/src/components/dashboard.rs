use leptos::ev;
use leptos::prelude::*;

use notesync::notes::{DRAFT_DOWNLOAD_NAME, DRAFT_NOTE_KEY, DraftNote};
use notesync::route::{Route, Section};

use crate::components::chatbot::ChatbotSection;
use crate::components::search::SearchSection;
use crate::components::upload::UploadSection;
use crate::platform;
use crate::state::AppState;
use crate::storage;

/// Signed-in home: quick-access cards, the selected section and a scratch note.
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<AppState>();
    let section = Memo::new(move |_| state.route.get().section());

    let open = move |route: Route| {
        move |ev: ev::MouseEvent| {
            ev.prevent_default();
            state.navigate(route);
        }
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Dashboard"</h1>
                <span class="greeting">
                    {move || state.username.get().map(|name| format!("Signed in as {name}"))}
                </span>
            </header>

            <div class="dashboard-body">
                <aside class="quick-access">
                    <h2>"Quick Access"</h2>
                    {Section::ALL
                        .into_iter()
                        .map(|s| {
                            let route = Route::Dashboard(Some(s));
                            view! {
                                <a
                                    href=route.path()
                                    class="option-card"
                                    class:active=move || section.get() == Some(s)
                                    on:click=open(route)
                                >
                                    <h3>{s.title()}</h3>
                                    <p>{s.description()}</p>
                                </a>
                            }
                        })
                        .collect_view()}
                    <a href=Route::Profile.path() class="option-card" on:click=open(Route::Profile)>
                        <h3>"User Profile"</h3>
                        <p>"Manage your account"</p>
                    </a>
                </aside>

                <main class="results-view">
                    <h2>"Results View"</h2>
                    {move || match section.get() {
                        Some(Section::Upload) => view! { <UploadSection /> }.into_any(),
                        Some(Section::Search) => view! { <SearchSection /> }.into_any(),
                        Some(Section::Chatbot) => view! { <ChatbotSection /> }.into_any(),
                        None => {
                            view! {
                                <p class="placeholder">"Select an option to view content"</p>
                            }
                                .into_any()
                        }
                    }}
                </main>

                <QuickNotes />
            </div>
        </div>
    }
}

/// A single scratch note kept in local storage.
#[component]
fn QuickNotes() -> impl IntoView {
    let note = RwSignal::new(DraftNote::restore(storage::load(DRAFT_NOTE_KEY)));

    let save = move |_| {
        note.update(|n| storage::store(DRAFT_NOTE_KEY, n.save()));
    };
    let download = move |_| {
        note.with_untracked(|n| {
            if let Err(e) = platform::download_text(DRAFT_DOWNLOAD_NAME, n.text()) {
                log::error!("Failed to download note: {e}");
            }
        });
    };

    view! {
        <aside class="quick-notes">
            <h2>"Quick Notes"</h2>
            <textarea
                placeholder="Jot something down..."
                prop:value=move || note.with(|n| n.text().to_string())
                on:input=move |ev| note.update(|n| n.edit(event_target_value(&ev)))
            ></textarea>
            <Show when=move || note.with(DraftNote::is_dirty)>
                <span class="unsaved">"Unsaved changes"</span>
            </Show>
            <div class="note-actions">
                <button class="primary-btn" on:click=save>"Save"</button>
                <button class="text-btn" on:click=download>"Download"</button>
            </div>
        </aside>
    }
}
