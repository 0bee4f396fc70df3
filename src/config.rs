/// Backend locations baked in at build time.
///
/// `NOTESYNC_API_BASE` prefixes every API call; leave it unset to talk to the
/// origin that served the app. `NOTESYNC_DOWNLOAD_BASE` prefixes the direct
/// download links handed to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub download_base: String,
}

const DEFAULT_DOWNLOAD_BASE: &str = "http://localhost:8080";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>, download_base: impl Into<String>) -> Self {
        Self {
            api_base: trim_base(api_base.into()),
            download_base: trim_base(download_base.into()),
        }
    }

    pub fn from_build_env() -> Self {
        let api_base = option_env!("NOTESYNC_API_BASE").unwrap_or_default();
        let download_base = option_env!("NOTESYNC_DOWNLOAD_BASE").unwrap_or(DEFAULT_DOWNLOAD_BASE);
        Self::new(api_base, download_base)
    }

    /// Absolute (or origin-relative) URL for an API path such as `/api/notes`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    pub fn download_url(&self, filename: &str) -> String {
        format!(
            "{}/api/notes/download/{}",
            self.download_base,
            urlencoding::encode(filename)
        )
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoint_is_origin_relative_by_default() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint("/api/chat/ask"), "/api/chat/ask");
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = ClientConfig::new("https://notes.example/", "https://files.example//");
        assert_eq!(config.endpoint("/api/notes"), "https://notes.example/api/notes");
        assert_eq!(
            config.download_url("a.txt"),
            "https://files.example/api/notes/download/a.txt"
        );
    }

    #[test]
    fn download_names_are_percent_encoded() {
        let config = ClientConfig::default();
        assert_eq!(
            config.download_url("week 1/notes&more.pdf"),
            "http://localhost:8080/api/notes/download/week%201%2Fnotes%26more.pdf"
        );
    }
}
