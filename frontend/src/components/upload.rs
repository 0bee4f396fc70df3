use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{File, FileList, HtmlInputElement};

use notesync::upload::{COMPLETE_RESET_MS, UploadPhase, UploadSession};

use crate::api;

fn files_of(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Pick or drop files and send them to cloud storage in one request.
#[component]
pub fn UploadSection() -> impl IntoView {
    let session = RwSignal::new_local(UploadSession::<File>::new());
    let (dragging, set_dragging) = signal(false);
    let picker = NodeRef::<html::Input>::new();

    let add_files = move |files: Vec<File>| {
        let added = session.try_update(|s| s.queue.extend(files)).unwrap_or(0);
        log::debug!("queued {added} file(s)");
    };

    let on_pick = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        add_files(files_of(input.files()));
        // Allow the same file to be chosen again.
        input.set_value("");
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        add_files(files_of(ev.data_transfer().and_then(|dt| dt.files())));
    };

    let on_upload = move |_| {
        let Some(files) = session.try_update(UploadSession::begin).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = api::upload_notes(&files).await;
            session.update(|s| s.finish(outcome));
            if session.with_untracked(|s| s.phase() == UploadPhase::Complete) {
                Timeout::new(COMPLETE_RESET_MS, move || session.update(UploadSession::settle))
                    .forget();
            }
        });
    };

    view! {
        <section class="upload-section">
            <h3>"Upload Notes"</h3>
            <div
                class="drop-zone"
                class:dragging=move || dragging.get()
                on:click=move |_| {
                    if let Some(input) = picker.get() {
                        input.click();
                    }
                }
                on:dragover=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    set_dragging.set(true);
                }
                on:dragleave=move |_| set_dragging.set(false)
                on:drop=on_drop
            >
                <p>"Drag & drop files here, or click to browse"</p>
                <input type="file" multiple class="hidden" node_ref=picker on:change=on_pick />
            </div>

            <Show when=move || session.with(|s| !s.queue.is_empty())>
                <div class="file-list">
                    <h4>{move || format!("Selected Files ({})", session.with(|s| s.queue.len()))}</h4>
                    <ul>
                        {move || {
                            session
                                .with(|s| s.queue.iter().map(File::name).collect::<Vec<_>>())
                                .into_iter()
                                .map(|name| view! { <li>{name}</li> })
                                .collect_view()
                        }}
                    </ul>
                </div>
            </Show>

            <button
                class="primary-btn"
                class:complete=move || session.with(|s| s.phase() == UploadPhase::Complete)
                disabled=move || {
                    session.with(|s| s.queue.is_empty() || s.phase() == UploadPhase::Uploading)
                }
                on:click=on_upload
            >
                {move || session.with(UploadSession::button_label)}
            </button>

            {move || {
                session
                    .with(|s| s.result().map(|text| (text.to_string(), s.failed())))
                    .map(|(text, failed)| {
                        view! {
                            <div class="upload-result" class:error=failed class:success=!failed>
                                {text}
                            </div>
                        }
                    })
            }}
        </section>
    }
}
