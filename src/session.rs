/// Which mood, if any, the client is working on.
///
/// Editing always carries the id of the mood being edited, so "edit mode
/// without an open mood" cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Viewing(String),
    Editing(String),
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_mood_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Viewing(id) | Self::Editing(id) => Some(id.as_str()),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Makes `id` the open mood, abandoning any edit in progress.
    pub fn open(&mut self, id: &str) {
        *self = Self::Viewing(id.to_string());
    }

    /// Switches the open mood into edit mode and returns its id.
    pub fn begin_edit(&mut self) -> Option<String> {
        let id = self.open_mood_id()?.to_string();
        *self = Self::Editing(id.clone());
        Some(id)
    }

    /// Drops edit mode but keeps the mood open.
    pub fn cancel_edit(&mut self) {
        if let Self::Editing(id) = self {
            let id = std::mem::take(id);
            *self = Self::Viewing(id);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
