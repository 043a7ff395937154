/// Where the session stands in the `Empty -> Loaded -> Cleaned` machine.
/// `Cleaned` is a sub-state of `Loaded`: a dataset is still present, and a
/// cleaned copy is now worth downloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Empty,
    Loaded,
    Cleaned,
}

/// The client's view of whether the backend currently holds a dataset.
/// One per process; transitions happen only on Upload, Clean and Reset
/// success.
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    dataset_label: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            stage: Stage::Empty,
            dataset_label: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.stage, Stage::Loaded | Stage::Cleaned)
    }

    pub fn is_cleaned(&self) -> bool {
        self.stage == Stage::Cleaned
    }

    /// Filename + shape summary shown in the status line.
    pub fn dataset_label(&self) -> Option<&str> {
        self.dataset_label.as_deref()
    }

    pub fn mark_loaded(&mut self, label: String) {
        self.stage = Stage::Loaded;
        self.dataset_label = Some(label);
    }

    pub fn mark_cleaned(&mut self) {
        if self.is_loaded() {
            self.stage = Stage::Cleaned;
        }
    }

    pub fn mark_unloaded(&mut self) {
        self.stage = Stage::Empty;
        self.dataset_label = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let session = Session::new();
        assert_eq!(session.stage(), Stage::Empty);
        assert!(!session.is_loaded());
        assert!(session.dataset_label().is_none());
    }

    #[test]
    fn upload_success_loads_and_persists_until_reset() {
        let mut session = Session::new();
        session.mark_loaded("sales.csv — 120 rows × 7 cols".to_string());
        assert!(session.is_loaded());
        assert_eq!(session.dataset_label(), Some("sales.csv — 120 rows × 7 cols"));

        // Still loaded after further uploads replace the label
        session.mark_loaded("other.csv — 5 rows × 2 cols".to_string());
        assert!(session.is_loaded());

        session.mark_unloaded();
        assert_eq!(session.stage(), Stage::Empty);
        assert!(session.dataset_label().is_none());
    }

    #[test]
    fn cleaned_is_still_loaded() {
        let mut session = Session::new();
        session.mark_loaded("a.csv".to_string());
        session.mark_cleaned();
        assert_eq!(session.stage(), Stage::Cleaned);
        assert!(session.is_loaded());
        assert!(session.is_cleaned());
    }

    #[test]
    fn cleaned_ignored_when_empty() {
        let mut session = Session::new();
        session.mark_cleaned();
        assert_eq!(session.stage(), Stage::Empty);
    }

    #[test]
    fn reset_clears_regardless_of_prior_state() {
        let mut session = Session::new();
        session.mark_loaded("a.csv".to_string());
        session.mark_cleaned();
        session.mark_unloaded();
        assert_eq!(session.stage(), Stage::Empty);

        // Resetting an empty session is a no-op that stays empty
        session.mark_unloaded();
        assert_eq!(session.stage(), Stage::Empty);
    }
}
