/// `localStorage` key of the dashboard's quick note.
pub const DRAFT_NOTE_KEY: &str = "quickNote";
/// `localStorage` key of the signed-in username.
pub const USERNAME_KEY: &str = "username";
/// File name offered when the quick note is downloaded.
pub const DRAFT_DOWNLOAD_NAME: &str = "my-notes.txt";

/// The quick note being edited and the copy last written to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftNote {
    text: String,
    saved: String,
}

impl DraftNote {
    /// Restore from storage; a restored note starts out clean.
    pub fn restore(saved: Option<String>) -> Self {
        let saved = saved.unwrap_or_default();
        Self { text: saved.clone(), saved }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn edit(&mut self, text: String) {
        self.text = text;
    }

    pub fn is_dirty(&self) -> bool {
        self.text != self.saved
    }

    /// Mark the current text as saved and return what must be persisted.
    pub fn save(&mut self) -> &str {
        self.saved.clone_from(&self.text);
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn restored_note_is_clean() {
        let note = DraftNote::restore(Some("groceries".into()));
        assert_eq!(note.text(), "groceries");
        assert!(!note.is_dirty());
        assert!(!DraftNote::restore(None).is_dirty());
    }

    #[test]
    fn edits_are_dirty_until_saved() {
        let mut note = DraftNote::restore(None);
        note.edit("call mom".into());
        assert!(note.is_dirty());
        assert_eq!(note.save(), "call mom");
        assert!(!note.is_dirty());
        note.edit(String::new());
        assert!(note.is_dirty());
    }
}
