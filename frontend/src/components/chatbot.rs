use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::Element;

use notesync::format::{
    CODE_CONTAINER_CLASS, COPIED_LABEL, COPY_BUTTON_CLASS, COPY_FEEDBACK_MS, COPY_LABEL,
    format_reply,
};
use notesync::inflight::InFlight;
use notesync::models::{ChatMessage, Sender, Transcript};

use crate::api;
use crate::platform::{self, PlatformHandle};

/// Dashboard chat panel. Replies are rendered as formatted markup with
/// copyable code blocks.
#[component]
pub fn ChatbotSection() -> impl IntoView {
    let platform = platform::use_platform();
    let transcript = RwSignal::new(Transcript::new());
    let inflight = RwSignal::new(InFlight::new());
    let (input, set_input) = signal(String::new());
    let loading = Memo::new(move |_| inflight.with(InFlight::is_busy));
    let end_ref = NodeRef::<html::Div>::new();

    let send = move || {
        let message = input.get_untracked();
        if message.trim().is_empty() {
            return;
        }
        let Some(ticket) = inflight.try_update(InFlight::begin).flatten() else {
            return;
        };
        transcript.update(|t| t.push(ChatMessage::user(message.clone())));
        set_input.set(String::new());

        spawn_local(async move {
            let reply = match api::ask_chat(&message).await {
                Ok(text) => ChatMessage::ai_formatted(format_reply(&text)),
                Err(e) => {
                    log::error!("Chat request failed: {e}");
                    ChatMessage::ai(format!("Error: {e}"))
                }
            };
            if inflight.try_update(|f| f.complete(ticket)).unwrap_or(false) {
                transcript.update(|t| t.push(reply));
            }
        });
    };

    Effect::new(move |_| {
        transcript.track();
        loading.track();
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    view! {
        <section class="chatbot-container">
            <div class="chatbot-header">
                <span class="robot-icon">"🤖"</span>
                <h2>"AI Assistant"</h2>
            </div>

            <div class="chat-messages" on:click=move |ev| copy_code_block(platform, ev)>
                {move || {
                    transcript
                        .with(|t| t.iter().cloned().collect::<Vec<_>>())
                        .into_iter()
                        .map(message_bubble)
                        .collect_view()
                }}
                <Show when=move || loading.get()>
                    <div class="message-bubble bot-message">
                        <div class="message-icon">"🤖"</div>
                        <div class="message-content">
                            <div class="typing-indicator">
                                <span></span>
                                <span></span>
                                <span></span>
                            </div>
                        </div>
                    </div>
                </Show>
                <div node_ref=end_ref></div>
            </div>

            <div class="chat-input-container">
                <input
                    type="text"
                    class="chat-input"
                    placeholder="Type your message here..."
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            send();
                        }
                    }
                />
                <button
                    class="send-button"
                    disabled=move || loading.get() || input.with(|s| s.trim().is_empty())
                    on:click=move |_| send()
                >
                    "Send"
                </button>
            </div>
        </section>
    }
}

fn message_bubble(message: ChatMessage) -> impl IntoView {
    let (bubble, icon) = match message.sender {
        Sender::User => ("message-bubble user-message", "👤"),
        Sender::Ai => ("message-bubble bot-message", "🤖"),
    };
    let body = if message.is_formatted {
        view! { <div class="message-text formatted" inner_html=message.text></div> }.into_any()
    } else {
        view! { <div class="message-text">{message.text}</div> }.into_any()
    };
    view! {
        <div class=bubble>
            <div class="message-icon">{icon}</div>
            <div class="message-content">{body}</div>
        </div>
    }
}

/// Delegated handler for the copy buttons inside rendered code blocks.
fn copy_code_block(platform: PlatformHandle, ev: ev::MouseEvent) {
    let Some(button) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    if !button.class_list().contains(COPY_BUTTON_CLASS) {
        return;
    }
    let code = button
        .closest(&format!(".{CODE_CONTAINER_CLASS}"))
        .ok()
        .flatten()
        .and_then(|container| container.query_selector("code").ok().flatten())
        .and_then(|code| code.text_content());
    let Some(code) = code else {
        log::warn!("copy button outside a code block");
        return;
    };

    let Some(clipboard) = platform.with_value(|p| p.clipboard.available().cloned()) else {
        log::error!("Failed to copy: clipboard unavailable");
        return;
    };
    spawn_local(async move {
        match clipboard.write_text(code).await {
            Ok(()) => {
                button.set_text_content(Some(COPIED_LABEL));
                Timeout::new(COPY_FEEDBACK_MS, move || {
                    button.set_text_content(Some(COPY_LABEL));
                })
                .forget();
            }
            Err(e) => log::error!("Failed to copy: {e}"),
        }
    });
}
