use std::rc::Rc;

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use notesync::assistant::{Assistant, AssistantEvent, Effect};
use notesync::models::{ChatMessage, Sender};

use crate::api;
use crate::platform::{self, PlatformHandle, RecognitionHandlers};

/// Feeds events into the [`Assistant`] reducer and performs the effects it
/// returns against the browser.
#[derive(Clone, Copy)]
struct AssistantDriver {
    state: RwSignal<Assistant>,
    platform: PlatformHandle,
}

impl AssistantDriver {
    fn dispatch(self, event: AssistantEvent) {
        let effects = self.state.try_update(|a| a.handle(event)).unwrap_or_default();
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self, effect: Effect) {
        match effect {
            Effect::RequestMicrophone => {
                let microphone =
                    self.platform.with_value(|p| p.microphone.require("Microphone").cloned());
                spawn_local(async move {
                    let outcome = match microphone {
                        Ok(mic) => mic.request().await,
                        Err(e) => Err(e),
                    };
                    let event = match outcome {
                        Ok(()) if self.platform.with_value(|p| p.recognizer.is_available()) => {
                            AssistantEvent::MicGranted
                        }
                        Ok(()) => AssistantEvent::RecognitionUnsupported,
                        Err(e) if e.is_permission_denied() => AssistantEvent::MicDenied,
                        Err(e) => {
                            log::error!("Microphone access error: {e}");
                            AssistantEvent::MicFailed(e.to_string())
                        }
                    };
                    self.dispatch(event);
                });
            }
            Effect::StartRecognition => {
                let recognizer = self.platform.with_value(|p| p.recognizer.available().cloned());
                let Some(recognizer) = recognizer else {
                    self.dispatch(AssistantEvent::RecognitionUnsupported);
                    return;
                };
                let handlers = RecognitionHandlers {
                    on_result: Box::new(move |text| self.dispatch(AssistantEvent::Transcript(text))),
                    on_error: Box::new(move |code| {
                        self.dispatch(AssistantEvent::RecognitionError(code))
                    }),
                    on_end: Box::new(move || self.dispatch(AssistantEvent::RecognitionEnded)),
                };
                if let Err(e) = recognizer.start(handlers) {
                    log::error!("Failed to start speech recognition: {e}");
                    self.dispatch(AssistantEvent::RecognitionError(e.to_string()));
                }
            }
            Effect::StopRecognition => {
                let recognizer = self.platform.with_value(|p| p.recognizer.available().cloned());
                if let Some(recognizer) = recognizer {
                    recognizer.stop();
                }
            }
            Effect::CancelSpeech => {
                let synth = self.platform.with_value(|p| p.synthesizer.available().cloned());
                if let Some(synth) = synth {
                    synth.cancel();
                }
            }
            Effect::SendChat { ticket, message } => {
                spawn_local(async move {
                    let event = match api::ask_chat(&message).await {
                        Ok(text) => AssistantEvent::ReplyReceived { ticket, text },
                        Err(e) => {
                            log::error!("Error: {e}");
                            AssistantEvent::ReplyFailed { ticket, error: e.to_string() }
                        }
                    };
                    self.dispatch(event);
                });
            }
            Effect::Speak(text) => {
                let ended: Rc<dyn Fn()> =
                    Rc::new(move || self.dispatch(AssistantEvent::SpeechEnded));
                let synth = self.platform.with_value(|p| p.synthesizer.available().cloned());
                match synth {
                    Some(synth) => {
                        if let Err(e) = synth.speak(&text, ended.clone()) {
                            log::warn!("Speech synthesis failed: {e}");
                            ended();
                        }
                    }
                    None => {
                        log::warn!("Speech synthesis unavailable");
                        ended();
                    }
                }
            }
            Effect::Alert(message) => platform::alert(&message),
        }
    }
}

/// Floating launcher plus modal chat that accepts typed or spoken input.
/// Spoken questions get spoken answers.
#[component]
pub fn AssistantWidget() -> impl IntoView {
    let driver = AssistantDriver {
        state: RwSignal::new(Assistant::new()),
        platform: platform::use_platform(),
    };
    let state = driver.state;
    let (open, set_open) = signal(false);
    let (input, set_input) = signal(String::new());
    let end_ref = NodeRef::<html::Div>::new();

    let loading = Memo::new(move |_| state.with(Assistant::is_loading));
    let listening = Memo::new(move |_| state.with(Assistant::is_listening));
    let speaking = Memo::new(move |_| state.with(Assistant::is_speaking));

    let submit = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || loading.get_untracked() {
            return;
        }
        set_input.set(String::new());
        driver.dispatch(AssistantEvent::TextSubmitted(text));
    };

    leptos::prelude::Effect::new(move |_| {
        state.with(|a| a.transcript().len());
        loading.track();
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    view! {
        <div class="ai-assistant-container">
            <Show when=move || !open.get()>
                <div class="floating-icon" on:click=move |_| set_open.set(true)>
                    "🤖"
                </div>
            </Show>

            <Show when=move || open.get()>
                <div class="assistant-modal">
                    <div class="modal-header">
                        <h3>"AI Assistant"</h3>
                        <button class="close-icon" on:click=move |_| set_open.set(false)>
                            "✕"
                        </button>
                    </div>

                    <div class="chat-container">
                        <div class="chat-messages">
                            {move || {
                                state
                                    .with(|a| a.transcript().iter().cloned().collect::<Vec<_>>())
                                    .into_iter()
                                    .map(assistant_message)
                                    .collect_view()
                            }}
                            <Show when=move || loading.get()>
                                <div class="message ai">
                                    <div class="message-icon">"🤖"</div>
                                    <div class="message-content">
                                        <div class="dot-loader">
                                            <div class="dot"></div>
                                            <div class="dot"></div>
                                            <div class="dot"></div>
                                        </div>
                                    </div>
                                </div>
                            </Show>
                            <div node_ref=end_ref></div>
                        </div>

                        <div class="chat-input-container">
                            <input
                                type="text"
                                placeholder="Type your message..."
                                prop:value=move || input.get()
                                disabled=move || loading.get()
                                on:input=move |ev| set_input.set(event_target_value(&ev))
                                on:keydown=move |ev: ev::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        submit();
                                    }
                                }
                            />
                            <div class="button-group">
                                <button
                                    class="icon-button"
                                    disabled=move || {
                                        loading.get() || input.with(|s| s.trim().is_empty())
                                    }
                                    on:click=move |_| submit()
                                >
                                    "➤"
                                </button>
                                <button
                                    class="icon-button mic-button"
                                    class:listening=move || listening.get()
                                    class:speaking=move || speaking.get()
                                    disabled=move || loading.get()
                                    on:click=move |_| driver.dispatch(AssistantEvent::MicPressed)
                                >
                                    "🎤"
                                    <Show when=move || listening.get() || speaking.get()>
                                        <div class="listening-animation"></div>
                                    </Show>
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn assistant_message(message: ChatMessage) -> impl IntoView {
    let icon = match message.sender {
        Sender::User => "👤",
        Sender::Ai => "🤖",
    };
    view! {
        <div class=format!("message {}", message.sender)>
            <div class="message-icon">{icon}</div>
            <div class="message-content">{message.text}</div>
        </div>
    }
}
