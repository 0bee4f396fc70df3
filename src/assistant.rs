//! State machine behind the floating voice/text assistant.
//!
//! [`Assistant::handle`] is a pure reducer: it moves between phases and hands
//! back the [`Effect`]s the view must perform (start the recogniser, send the
//! chat request, speak...). Completions of those effects come back in as
//! further [`AssistantEvent`]s.

use tracing::{debug, warn};

use crate::inflight::InFlight;
use crate::models::{ChatMessage, Transcript};

pub const MIC_DENIED_ALERT: &str =
    "Microphone access was denied. Please allow access to use voice input.";
pub const RECOGNITION_UNSUPPORTED_ALERT: &str = "Speech recognition not supported in your browser";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    Typed,
    Voice,
}

/// Exactly one phase is active, so listening, loading and speaking can never
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Listening,
    Loading { origin: InputOrigin },
    Speaking,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantEvent {
    MicPressed,
    MicGranted,
    MicDenied,
    MicFailed(String),
    RecognitionUnsupported,
    Transcript(String),
    RecognitionError(String),
    RecognitionEnded,
    TextSubmitted(String),
    ReplyReceived { ticket: u64, text: String },
    ReplyFailed { ticket: u64, error: String },
    SpeechEnded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestMicrophone,
    StartRecognition,
    StopRecognition,
    CancelSpeech,
    SendChat { ticket: u64, message: String },
    Speak(String),
    Alert(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assistant {
    phase: Phase,
    awaiting_mic: bool,
    inflight: InFlight,
    transcript: Transcript,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_listening(&self) -> bool {
        self.phase == Phase::Listening
    }

    pub fn is_speaking(&self) -> bool {
        self.phase == Phase::Speaking
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn handle(&mut self, event: AssistantEvent) -> Vec<Effect> {
        debug!(?event, phase = ?self.phase, "assistant event");
        match event {
            AssistantEvent::MicPressed => self.mic_pressed(),
            AssistantEvent::MicGranted => {
                if !std::mem::take(&mut self.awaiting_mic) || self.phase != Phase::Idle {
                    return Vec::new();
                }
                self.phase = Phase::Listening;
                vec![Effect::StartRecognition]
            }
            AssistantEvent::MicDenied => self.abort_voice(MIC_DENIED_ALERT.to_string()),
            AssistantEvent::MicFailed(msg) => {
                self.abort_voice(format!("Error accessing microphone: {msg}"))
            }
            AssistantEvent::RecognitionUnsupported => {
                self.abort_voice(RECOGNITION_UNSUPPORTED_ALERT.to_string())
            }
            AssistantEvent::Transcript(text) => {
                if self.phase != Phase::Listening {
                    return Vec::new();
                }
                self.phase = Phase::Idle;
                self.submit(text, InputOrigin::Voice)
            }
            AssistantEvent::RecognitionError(code) => {
                if self.phase != Phase::Listening {
                    return Vec::new();
                }
                warn!("speech recognition error: {code}");
                self.phase = Phase::Idle;
                let alert = if code == "not-allowed" {
                    MIC_DENIED_ALERT.to_string()
                } else {
                    format!("Error occurred in speech recognition: {code}")
                };
                vec![Effect::Alert(alert)]
            }
            AssistantEvent::RecognitionEnded => {
                if self.phase == Phase::Listening {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }
            AssistantEvent::TextSubmitted(text) => {
                let mut effects = match self.phase {
                    Phase::Loading { .. } => return Vec::new(),
                    Phase::Listening => vec![Effect::StopRecognition],
                    Phase::Speaking => vec![Effect::CancelSpeech],
                    Phase::Idle => Vec::new(),
                };
                if text.trim().is_empty() {
                    return Vec::new();
                }
                self.phase = Phase::Idle;
                effects.extend(self.submit(text, InputOrigin::Typed));
                effects
            }
            AssistantEvent::ReplyReceived { ticket, text } => {
                let Phase::Loading { origin } = self.phase else {
                    return Vec::new();
                };
                if !self.inflight.complete(ticket) {
                    return Vec::new();
                }
                self.transcript.push(ChatMessage::ai(text.clone()));
                match origin {
                    InputOrigin::Voice => {
                        self.phase = Phase::Speaking;
                        vec![Effect::Speak(text)]
                    }
                    InputOrigin::Typed => {
                        self.phase = Phase::Idle;
                        Vec::new()
                    }
                }
            }
            AssistantEvent::ReplyFailed { ticket, error } => {
                if !self.inflight.complete(ticket) {
                    return Vec::new();
                }
                self.transcript.push(ChatMessage::ai(format!("Error: {error}")));
                self.phase = Phase::Idle;
                Vec::new()
            }
            AssistantEvent::SpeechEnded => {
                if self.phase == Phase::Speaking {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }
        }
    }

    /// The mic button doubles as the stop control for whichever speech
    /// operation is running.
    fn mic_pressed(&mut self) -> Vec<Effect> {
        match self.phase {
            Phase::Loading { .. } => Vec::new(),
            Phase::Speaking => {
                self.phase = Phase::Idle;
                vec![Effect::CancelSpeech]
            }
            Phase::Listening => {
                self.phase = Phase::Idle;
                vec![Effect::StopRecognition]
            }
            Phase::Idle if self.awaiting_mic => Vec::new(),
            Phase::Idle => {
                self.awaiting_mic = true;
                vec![Effect::RequestMicrophone]
            }
        }
    }

    fn abort_voice(&mut self, alert: String) -> Vec<Effect> {
        self.awaiting_mic = false;
        if self.phase == Phase::Listening {
            self.phase = Phase::Idle;
        }
        vec![Effect::Alert(alert)]
    }

    fn submit(&mut self, text: String, origin: InputOrigin) -> Vec<Effect> {
        let message = text.trim().to_string();
        if message.is_empty() {
            return Vec::new();
        }
        let Some(ticket) = self.inflight.begin() else {
            return Vec::new();
        };
        self.transcript.push(ChatMessage::user(message.clone()));
        self.phase = Phase::Loading { origin };
        vec![Effect::SendChat { ticket, message }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;
    use pretty_assertions::assert_eq;

    fn active_flags(a: &Assistant) -> usize {
        [a.is_listening(), a.is_speaking(), a.is_loading()]
            .into_iter()
            .filter(|f| *f)
            .count()
    }

    fn drive(a: &mut Assistant, events: Vec<AssistantEvent>) -> Vec<Effect> {
        let mut all = Vec::new();
        for event in events {
            all.extend(a.handle(event));
            assert!(active_flags(a) <= 1, "overlapping phases: {:?}", a.phase());
        }
        all
    }

    #[test]
    fn voice_round_trip_speaks_the_reply() {
        let mut a = Assistant::new();
        let effects = drive(
            &mut a,
            vec![
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::Transcript("what's new".into()),
                AssistantEvent::ReplyReceived { ticket: 1, text: "Nothing much".into() },
            ],
        );
        assert_eq!(
            effects,
            vec![
                Effect::RequestMicrophone,
                Effect::StartRecognition,
                Effect::SendChat { ticket: 1, message: "what's new".into() },
                Effect::Speak("Nothing much".into()),
            ]
        );
        assert_eq!(a.phase(), Phase::Speaking);
        drive(&mut a, vec![AssistantEvent::SpeechEnded]);
        assert_eq!(a.phase(), Phase::Idle);
        assert_eq!(a.transcript().len(), 2);
    }

    #[test]
    fn typed_reply_is_never_spoken() {
        let mut a = Assistant::new();
        let effects = drive(
            &mut a,
            vec![
                AssistantEvent::TextSubmitted("  hi  ".into()),
                AssistantEvent::ReplyReceived { ticket: 1, text: "hello".into() },
            ],
        );
        assert_eq!(effects, vec![Effect::SendChat { ticket: 1, message: "hi".into() }]);
        assert_eq!(a.phase(), Phase::Idle);
        let senders: Vec<Sender> = a.transcript().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Ai]);
    }

    #[test]
    fn denied_microphone_alerts_and_stays_idle() {
        let mut a = Assistant::new();
        let effects = drive(&mut a, vec![AssistantEvent::MicPressed, AssistantEvent::MicDenied]);
        assert_eq!(
            effects,
            vec![Effect::RequestMicrophone, Effect::Alert(MIC_DENIED_ALERT.into())]
        );
        assert_eq!(a.phase(), Phase::Idle);
        // A late grant after the denial must not start listening.
        assert!(a.handle(AssistantEvent::MicGranted).is_empty());
        assert_eq!(a.phase(), Phase::Idle);
    }

    #[test]
    fn recognition_error_and_manual_stop_return_to_idle() {
        let mut a = Assistant::new();
        let effects = drive(
            &mut a,
            vec![
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::RecognitionError("no-speech".into()),
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::MicPressed,
                AssistantEvent::RecognitionError("aborted".into()),
                AssistantEvent::RecognitionEnded,
            ],
        );
        assert_eq!(
            effects,
            vec![
                Effect::RequestMicrophone,
                Effect::StartRecognition,
                Effect::Alert("Error occurred in speech recognition: no-speech".into()),
                Effect::RequestMicrophone,
                Effect::StartRecognition,
                Effect::StopRecognition,
            ]
        );
        assert_eq!(a.phase(), Phase::Idle);
    }

    #[test]
    fn not_allowed_recognition_error_uses_denial_text() {
        let mut a = Assistant::new();
        let effects = drive(
            &mut a,
            vec![
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::RecognitionError("not-allowed".into()),
            ],
        );
        assert_eq!(effects.last(), Some(&Effect::Alert(MIC_DENIED_ALERT.into())));
    }

    #[test]
    fn loading_blocks_mic_and_text() {
        let mut a = Assistant::new();
        drive(&mut a, vec![AssistantEvent::TextSubmitted("one".into())]);
        assert!(a.is_loading());
        assert!(a.handle(AssistantEvent::MicPressed).is_empty());
        assert!(a.handle(AssistantEvent::TextSubmitted("two".into())).is_empty());
        assert_eq!(a.transcript().len(), 1);
    }

    #[test]
    fn mic_press_while_speaking_cancels_playback() {
        let mut a = Assistant::new();
        drive(
            &mut a,
            vec![
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::Transcript("hey".into()),
                AssistantEvent::ReplyReceived { ticket: 1, text: "yo".into() },
            ],
        );
        assert_eq!(a.handle(AssistantEvent::MicPressed), vec![Effect::CancelSpeech]);
        assert_eq!(a.phase(), Phase::Idle);
    }

    #[test]
    fn typing_while_speaking_cancels_playback() {
        let mut a = Assistant::new();
        drive(
            &mut a,
            vec![
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::Transcript("hey".into()),
                AssistantEvent::ReplyReceived { ticket: 1, text: "yo".into() },
            ],
        );
        assert!(a.is_speaking());
        let effects = a.handle(AssistantEvent::TextSubmitted("t".into()));
        assert_eq!(
            effects,
            vec![Effect::CancelSpeech, Effect::SendChat { ticket: 2, message: "t".into() }]
        );
        assert_eq!(a.phase(), Phase::Loading { origin: InputOrigin::Typed });
        // Cancelled playback still reports its end; it must not leave loading.
        assert!(a.handle(AssistantEvent::SpeechEnded).is_empty());
        assert!(a.is_loading());
    }

    #[test]
    fn typing_while_listening_stops_recognition_first() {
        let mut a = Assistant::new();
        drive(&mut a, vec![AssistantEvent::MicPressed, AssistantEvent::MicGranted]);
        let effects = a.handle(AssistantEvent::TextSubmitted("typed".into()));
        assert_eq!(
            effects,
            vec![
                Effect::StopRecognition,
                Effect::SendChat { ticket: 1, message: "typed".into() },
            ]
        );
        assert_eq!(a.phase(), Phase::Loading { origin: InputOrigin::Typed });
        // The recogniser's own end callback arrives afterwards and is harmless.
        assert!(a.handle(AssistantEvent::RecognitionEnded).is_empty());
        assert!(a.is_loading());
    }

    #[test]
    fn failed_reply_is_logged_as_message() {
        let mut a = Assistant::new();
        drive(
            &mut a,
            vec![
                AssistantEvent::TextSubmitted("q".into()),
                AssistantEvent::ReplyFailed { ticket: 1, error: "HTTP error! status: 500".into() },
            ],
        );
        assert_eq!(a.phase(), Phase::Idle);
        assert_eq!(
            a.transcript().iter().last().map(|m| m.text.as_str()),
            Some("Error: HTTP error! status: 500")
        );
    }

    #[test]
    fn stale_reply_is_ignored() {
        let mut a = Assistant::new();
        drive(&mut a, vec![AssistantEvent::TextSubmitted("q".into())]);
        let effects = a.handle(AssistantEvent::ReplyReceived { ticket: 7, text: "late".into() });
        assert!(effects.is_empty());
        assert!(a.is_loading());
        assert_eq!(a.transcript().len(), 1);
    }

    #[test]
    fn empty_transcript_returns_to_idle_without_request() {
        let mut a = Assistant::new();
        let effects = drive(
            &mut a,
            vec![
                AssistantEvent::MicPressed,
                AssistantEvent::MicGranted,
                AssistantEvent::Transcript("   ".into()),
            ],
        );
        assert_eq!(effects, vec![Effect::RequestMicrophone, Effect::StartRecognition]);
        assert_eq!(a.phase(), Phase::Idle);
    }

    #[test]
    fn unsupported_recognition_alerts() {
        let mut a = Assistant::new();
        let effects = drive(
            &mut a,
            vec![AssistantEvent::MicPressed, AssistantEvent::RecognitionUnsupported],
        );
        assert_eq!(effects.last(), Some(&Effect::Alert(RECOGNITION_UNSUPPORTED_ALERT.into())));
        assert_eq!(a.handle(AssistantEvent::MicPressed), vec![Effect::RequestMicrophone]);
    }
}
