use crate::errors::ClientError;

pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";
/// How long the "Upload Complete!" state lingers before the button resets.
pub const COMPLETE_RESET_MS: u32 = 3_000;

/// Ordered set of files picked or dropped for the next upload. Equality is
/// identity for browser file handles, so picking the same handle twice keeps
/// one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadQueue<F> {
    files: Vec<F>,
}

impl<F> Default for UploadQueue<F> {
    fn default() -> Self {
        Self { files: Vec::new() }
    }
}

impl<F: PartialEq> UploadQueue<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append new files in order, skipping ones already queued. Returns how
    /// many were added.
    pub fn extend(&mut self, files: impl IntoIterator<Item = F>) -> usize {
        let before = self.files.len();
        for file in files {
            if !self.files.contains(&file) {
                self.files.push(file);
            }
        }
        self.files.len() - before
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.files.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Complete,
}

/// The upload view's state: the queue, the request phase and the last
/// server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession<F> {
    pub queue: UploadQueue<F>,
    phase: UploadPhase,
    result: Option<String>,
    failed: bool,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self {
            queue: UploadQueue::default(),
            phase: UploadPhase::Idle,
            result: None,
            failed: false,
        }
    }
}

impl<F: PartialEq + Clone> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Start an upload of the current queue. `None` when there is nothing to
    /// send or a request is already running.
    pub fn begin(&mut self) -> Option<Vec<F>> {
        if self.queue.is_empty() || self.phase == UploadPhase::Uploading {
            return None;
        }
        self.phase = UploadPhase::Uploading;
        Some(self.queue.iter().cloned().collect())
    }

    /// Record the server's reply. A successful upload empties the queue.
    pub fn finish(&mut self, outcome: Result<String, ClientError>) {
        match outcome {
            Ok(text) => {
                tracing::info!(files = self.queue.len(), "upload accepted");
                self.queue.clear();
                self.result = Some(text);
                self.failed = false;
                self.phase = UploadPhase::Complete;
            }
            Err(e) => {
                tracing::error!("upload failed: {e}");
                let text = e.response_body().unwrap_or(UPLOAD_FAILED_MESSAGE);
                self.result = Some(text.to_string());
                self.failed = true;
                self.phase = UploadPhase::Idle;
            }
        }
    }

    /// Drop the transient "complete" state once its display window is over.
    pub fn settle(&mut self) {
        if self.phase == UploadPhase::Complete {
            self.phase = UploadPhase::Idle;
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self.phase {
            UploadPhase::Uploading => "Uploading...",
            UploadPhase::Complete => "Upload Complete!",
            UploadPhase::Idle => "Upload Files",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn picked_and_dropped_files_accumulate_in_order() {
        let mut session = UploadSession::new();
        assert_eq!(session.queue.extend(["a.txt", "b.txt"]), 2);
        assert_eq!(session.queue.extend(["c.txt"]), 1);
        let names: Vec<&str> = session.queue.iter().copied().collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);

        let sent = session.begin();
        assert_eq!(sent, Some(vec!["a.txt", "b.txt", "c.txt"]));
        session.finish(Ok("3 files uploaded".to_string()));
        assert!(session.queue.is_empty());
        assert_eq!(session.result(), Some("3 files uploaded"));
        assert_eq!(session.phase(), UploadPhase::Complete);
    }

    #[test]
    fn same_handle_is_queued_once() {
        let mut queue = UploadQueue::new();
        queue.extend([1, 2]);
        assert_eq!(queue.extend([2, 3, 3]), 1);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn failure_keeps_the_queue() {
        let mut session = UploadSession::new();
        session.queue.extend(["a"]);
        assert!(session.begin().is_some());
        assert_eq!(session.begin(), None);
        session.finish(Err(ClientError::Network("offline".into())));
        assert_eq!(session.queue.len(), 1);
        assert!(session.failed());
        assert_eq!(session.result(), Some(UPLOAD_FAILED_MESSAGE));
        assert_eq!(session.button_label(), "Upload Files");
    }

    #[test]
    fn rejected_upload_shows_server_text() {
        let mut session = UploadSession::new();
        session.queue.extend(["big.pdf"]);
        session.begin();
        session.finish(Err(ClientError::status(413, "File too large")));
        assert!(session.failed());
        assert_eq!(session.result(), Some("File too large"));
        assert_eq!(session.queue.len(), 1);

        session.begin();
        session.finish(Err(ClientError::status(500, "  ")));
        assert_eq!(session.result(), Some(UPLOAD_FAILED_MESSAGE));
    }

    #[test]
    fn empty_queue_does_not_upload() {
        let mut session: UploadSession<&str> = UploadSession::new();
        assert_eq!(session.begin(), None);
        assert_eq!(session.phase(), UploadPhase::Idle);
    }

    #[test]
    fn complete_state_settles_back_to_idle() {
        let mut session = UploadSession::new();
        session.queue.extend(["a"]);
        session.begin();
        assert_eq!(session.button_label(), "Uploading...");
        session.finish(Ok("ok".into()));
        assert_eq!(session.button_label(), "Upload Complete!");
        session.settle();
        assert_eq!(session.phase(), UploadPhase::Idle);
    }
}
