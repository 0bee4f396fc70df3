use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use notesync::models::NoteHit;

use crate::api;

/// Search stored notes by name and link each hit to its download.
#[component]
pub fn SearchSection() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (hits, set_hits) = signal(Vec::<NoteHit>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let q = query.get_untracked();
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::search_notes(&q).await {
                Ok(names) => {
                    set_hits.set(names.into_iter().map(NoteHit::classify).collect());
                }
                Err(e) => {
                    log::error!("Error searching notes: {e}");
                    set_hits.set(Vec::new());
                    set_error.set(Some("Error searching notes. Please try again.".to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <section class="search-section">
            <h2 class="search-title">"Search Files"</h2>
            <form class="search-container" on:submit=on_submit>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Enter file name"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button type="submit" class="search-button" disabled=move || loading.get()>
                    "Search"
                </button>
            </form>

            {move || error.get().map(|msg| view! { <div class="alert error">{msg}</div> })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading"><div class="loading-spinner"></div></div> }
            >
                <ul class="search-results">
                    <For
                        each=move || hits.get().into_iter().enumerate()
                        key=|(i, _)| *i
                        children=|(_, hit)| view! { <SearchHit hit=hit /> }
                    />
                </ul>
            </Show>
        </section>
    }
}

#[component]
fn SearchHit(hit: NoteHit) -> impl IntoView {
    match hit {
        NoteHit::Restricted(name) => view! {
            <li class="search-item restricted">
                <span class="file-name"><i class="alert-icon"></i>" "{name}</span>
            </li>
        }
        .into_any(),
        NoteHit::Downloadable(name) => {
            let href = api::config().download_url(&name);
            view! {
                <li class="search-item">
                    <span class="file-name">{name.clone()}</span>
                    <a class="download-link" href=href download=name>"Download"</a>
                </li>
            }
            .into_any()
        }
    }
}
