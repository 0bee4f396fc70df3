//! Browser capabilities behind small traits, so views receive them from
//! context instead of reaching for `window` globals.

use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, DomException, HtmlAnchorElement, MediaDevices, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, SpeechSynthesis, SpeechSynthesisUtterance, Url,
};

use notesync::{Capability, ClientError};

pub trait SpeechRecognizer {
    fn start(&self, handlers: RecognitionHandlers) -> Result<(), ClientError>;
    fn stop(&self);
}

/// Callbacks for one recognition session.
pub struct RecognitionHandlers {
    pub on_result: Box<dyn Fn(String)>,
    pub on_error: Box<dyn Fn(String)>,
    pub on_end: Box<dyn Fn()>,
}

pub trait SpeechSynthesizer {
    /// `on_end` fires when playback finishes, is cancelled, or fails.
    fn speak(&self, text: &str, on_end: Rc<dyn Fn()>) -> Result<(), ClientError>;
    fn cancel(&self);
}

pub trait ClipboardWriter {
    fn write_text(&self, text: String) -> LocalBoxFuture<'static, Result<(), ClientError>>;
}

pub trait Microphone {
    /// Ask for microphone access and release the granted stream right away.
    fn request(&self) -> LocalBoxFuture<'static, Result<(), ClientError>>;
}

pub struct Platform {
    pub recognizer: Capability<Rc<dyn SpeechRecognizer>>,
    pub synthesizer: Capability<Rc<dyn SpeechSynthesizer>>,
    pub clipboard: Capability<Rc<dyn ClipboardWriter>>,
    pub microphone: Capability<Rc<dyn Microphone>>,
}

impl Platform {
    /// Probe the running browser.
    pub fn detect() -> Self {
        let window = window();
        let navigator = window.navigator();

        let recognizer = Capability::from_option(
            WebRecognizer::detect(&window).map(|r| Rc::new(r) as Rc<dyn SpeechRecognizer>),
        );
        let synthesizer = Capability::from_option(
            window
                .speech_synthesis()
                .ok()
                .map(|s| Rc::new(WebSynthesizer::new(s)) as Rc<dyn SpeechSynthesizer>),
        );
        let clipboard = Capability::from_option(
            WebClipboard::detect(&navigator).map(|c| Rc::new(c) as Rc<dyn ClipboardWriter>),
        );
        let microphone = Capability::from_option(
            navigator
                .media_devices()
                .ok()
                .map(|d| Rc::new(WebMicrophone { devices: d }) as Rc<dyn Microphone>),
        );

        if !recognizer.is_available() {
            log::warn!("Speech recognition not supported in this browser");
        }
        if !synthesizer.is_available() {
            log::warn!("Speech synthesis not supported in this browser");
        }

        Self { recognizer, synthesizer, clipboard, microphone }
    }
}

pub type PlatformHandle = StoredValue<Platform, LocalStorage>;

pub fn provide_platform(platform: Platform) -> PlatformHandle {
    let handle = StoredValue::new_local(platform);
    provide_context(handle);
    handle
}

pub fn use_platform() -> PlatformHandle {
    expect_context::<PlatformHandle>()
}

pub fn alert(message: &str) {
    if window().alert_with_message(message).is_err() {
        log::error!("alert failed: {message}");
    }
}

/// Offer `text` to the user as a downloaded plain-text file.
pub fn download_text(filename: &str, text: &str) -> Result<(), ClientError> {
    let parts = Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document()
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|el| js_error(el.into()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)
}

pub(crate) fn js_error(value: JsValue) -> ClientError {
    if let Some(e) = value.dyn_ref::<DomException>() {
        return ClientError::Platform(format!("{}: {}", e.name(), e.message()));
    }
    ClientError::Platform(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn js_str(s: &str) -> JsValue {
    JsValue::from_str(s)
}

// ── Speech recognition ────────────────────────────────────────────────────────

/// Wraps the (often vendor-prefixed) `SpeechRecognition` object. Handler
/// closures live here and are replaced on every start.
struct WebRecognizer {
    inner: JsValue,
    callbacks: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl WebRecognizer {
    fn detect(window: &web_sys::Window) -> Option<Self> {
        let ctor = ["SpeechRecognition", "webkitSpeechRecognition"]
            .into_iter()
            .filter_map(|name| Reflect::get(window, &js_str(name)).ok())
            .find(JsValue::is_function)?;
        let inner = Reflect::construct(ctor.unchecked_ref::<Function>(), &Array::new()).ok()?;

        for (key, value) in [
            ("continuous", JsValue::FALSE),
            ("interimResults", JsValue::FALSE),
            ("lang", js_str("en-US")),
        ] {
            if Reflect::set(&inner, &js_str(key), &value).is_err() {
                log::warn!("could not set recognition option {key}");
            }
        }

        Some(Self { inner, callbacks: RefCell::new(Vec::new()) })
    }

    fn call(&self, method: &str) -> Result<(), ClientError> {
        let f: Function = Reflect::get(&self.inner, &js_str(method))
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        f.call0(&self.inner).map_err(js_error)?;
        Ok(())
    }
}

impl SpeechRecognizer for WebRecognizer {
    fn start(&self, handlers: RecognitionHandlers) -> Result<(), ClientError> {
        let RecognitionHandlers { on_result, on_error, on_end } = handlers;

        let closures = vec![
            (
                "onresult",
                Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                    match transcript_of(&event) {
                        Some(text) => {
                            log::info!("Recognized: {text}");
                            on_result(text);
                        }
                        None => log::warn!("recognition result without transcript"),
                    }
                }),
            ),
            (
                "onerror",
                Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                    let code = Reflect::get(&event, &js_str("error"))
                        .ok()
                        .and_then(|v| v.as_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    on_error(code);
                }),
            ),
            (
                "onend",
                Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
                    log::debug!("Speech recognition ended");
                    on_end();
                }),
            ),
        ];

        // Install the new handlers before dropping the previous session's.
        let mut fresh = Vec::with_capacity(closures.len());
        for (name, closure) in closures {
            Reflect::set(&self.inner, &js_str(name), closure.as_ref()).map_err(js_error)?;
            fresh.push(closure);
        }
        drop(self.callbacks.replace(fresh));

        self.call("start")?;
        log::info!("Listening...");
        Ok(())
    }

    fn stop(&self) {
        if let Err(e) = self.call("stop") {
            log::warn!("failed to stop recognition: {e}");
        }
    }
}

fn transcript_of(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &js_str("results")).ok()?;
    let first = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&first, 0).ok()?;
    Reflect::get(&alternative, &js_str("transcript")).ok()?.as_string()
}

// ── Speech synthesis ──────────────────────────────────────────────────────────

struct WebSynthesizer {
    synth: SpeechSynthesis,
    callbacks: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl WebSynthesizer {
    fn new(synth: SpeechSynthesis) -> Self {
        Self { synth, callbacks: RefCell::new(Vec::new()) }
    }
}

impl SpeechSynthesizer for WebSynthesizer {
    fn speak(&self, text: &str, on_end: Rc<dyn Fn()>) -> Result<(), ClientError> {
        let utterance = SpeechSynthesisUtterance::new_with_text(text).map_err(js_error)?;
        utterance.set_lang("en-US");

        let ended = {
            let on_end = on_end.clone();
            Closure::<dyn FnMut()>::new(move || on_end())
        };
        let failed = Closure::<dyn FnMut()>::new(move || on_end());
        utterance.set_onend(Some(ended.as_ref().unchecked_ref()));
        utterance.set_onerror(Some(failed.as_ref().unchecked_ref()));
        drop(self.callbacks.replace(vec![ended, failed]));

        self.synth.speak(&utterance);
        Ok(())
    }

    fn cancel(&self) {
        self.synth.cancel();
    }
}

// ── Clipboard ─────────────────────────────────────────────────────────────────

struct WebClipboard {
    clipboard: JsValue,
}

impl WebClipboard {
    fn detect(navigator: &web_sys::Navigator) -> Option<Self> {
        let clipboard = Reflect::get(navigator, &js_str("clipboard")).ok()?;
        clipboard.is_object().then_some(Self { clipboard })
    }
}

impl ClipboardWriter for WebClipboard {
    fn write_text(&self, text: String) -> LocalBoxFuture<'static, Result<(), ClientError>> {
        let clipboard = self.clipboard.clone();
        Box::pin(async move {
            let write: Function = Reflect::get(&clipboard, &js_str("writeText"))
                .map_err(js_error)?
                .dyn_into()
                .map_err(js_error)?;
            let promise: Promise = write
                .call1(&clipboard, &JsValue::from_str(&text))
                .map_err(js_error)?
                .dyn_into()
                .map_err(js_error)?;
            JsFuture::from(promise).await.map_err(js_error)?;
            Ok(())
        })
    }
}

// ── Microphone permission ─────────────────────────────────────────────────────

struct WebMicrophone {
    devices: MediaDevices,
}

impl Microphone for WebMicrophone {
    fn request(&self) -> LocalBoxFuture<'static, Result<(), ClientError>> {
        let devices = self.devices.clone();
        Box::pin(async move {
            let constraints = MediaStreamConstraints::new();
            constraints.set_audio(&JsValue::TRUE);
            let promise = devices
                .get_user_media_with_constraints(&constraints)
                .map_err(media_error)?;
            let stream: MediaStream = JsFuture::from(promise)
                .await
                .map_err(media_error)?
                .dyn_into()
                .map_err(js_error)?;

            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
            Ok(())
        })
    }
}

fn media_error(value: JsValue) -> ClientError {
    match value.dyn_ref::<DomException>() {
        Some(e) if e.name() == "NotAllowedError" => ClientError::denied("Microphone"),
        Some(e) => ClientError::Platform(e.message()),
        None => js_error(value),
    }
}
