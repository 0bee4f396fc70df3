use std::sync::LazyLock;

use gloo_net::http::{Request, Response};
use serde_json::Value;
use web_sys::{File, FormData};

use notesync::models::{
    ChatRequest, LoginRequest, RegisterRequest, UserProfile, extract_reply_text, parse_note_list,
};
use notesync::{ClientConfig, ClientError};

use crate::platform::js_error;

static CONFIG: LazyLock<ClientConfig> = LazyLock::new(ClientConfig::from_build_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}

fn network(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn parse(e: gloo_net::Error) -> ClientError {
    ClientError::Parse(e.to_string())
}

/// Turn non-2xx responses into [`ClientError::Status`], keeping the body so
/// callers can show the server's own message.
async fn ensure_ok(resp: Response) -> Result<Response, ClientError> {
    if resp.ok() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::status(resp.status(), body))
}

/// Sends one message to the chatbot and returns the reply text.
pub async fn ask_chat(message: &str) -> Result<String, ClientError> {
    let body = ChatRequest { message: message.to_string() };

    let resp = Request::post(&config().endpoint("/api/chat/ask"))
        .json(&body)
        .map_err(parse)?
        .send()
        .await
        .map_err(network)?;
    let resp = ensure_ok(resp).await?;

    let data = resp.json::<Value>().await.map_err(parse)?;
    Ok(extract_reply_text(&data))
}

pub async fn login(request: &LoginRequest) -> Result<String, ClientError> {
    let resp = Request::post(&config().endpoint("/api/auth/login"))
        .json(request)
        .map_err(parse)?
        .send()
        .await
        .map_err(network)?;
    ensure_ok(resp).await?.text().await.map_err(parse)
}

pub async fn register(request: &RegisterRequest) -> Result<String, ClientError> {
    let resp = Request::post(&config().endpoint("/api/auth/register"))
        .json(request)
        .map_err(parse)?
        .send()
        .await
        .map_err(network)?;
    ensure_ok(resp).await?.text().await.map_err(parse)
}

/// Searches stored notes by file name.
pub async fn search_notes(query: &str) -> Result<Vec<String>, ClientError> {
    let resp = Request::get(&config().endpoint("/api/notes"))
        .query([("search", query)])
        .send()
        .await
        .map_err(network)?;
    let resp = ensure_ok(resp).await?;

    let data = resp.json::<Value>().await.map_err(parse)?;
    log::debug!("Search response data: {data}");
    Ok(parse_note_list(&data))
}

/// Uploads every file under the repeated `files` multipart field.
pub async fn upload_notes(files: &[File]) -> Result<String, ClientError> {
    let form = FormData::new().map_err(js_error)?;
    for file in files {
        form.append_with_blob_and_filename("files", file, &file.name())
            .map_err(js_error)?;
    }

    let resp = Request::post(&config().endpoint("/api/notes/upload"))
        .body(form)
        .map_err(parse)?
        .send()
        .await
        .map_err(network)?;
    ensure_ok(resp).await?.text().await.map_err(parse)
}

pub async fn fetch_profile(username: &str) -> Result<UserProfile, ClientError> {
    let resp = Request::get(&config().endpoint("/api/users/profile"))
        .query([("username", username)])
        .send()
        .await
        .map_err(network)?;
    ensure_ok(resp).await?.json::<UserProfile>().await.map_err(parse)
}

pub async fn update_profile(profile: &UserProfile) -> Result<UserProfile, ClientError> {
    let resp = Request::put(&config().endpoint("/api/users/profile"))
        .json(profile)
        .map_err(parse)?
        .send()
        .await
        .map_err(network)?;
    ensure_ok(resp).await?.json::<UserProfile>().await.map_err(parse)
}
