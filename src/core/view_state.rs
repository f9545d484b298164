#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Overview,
    Train,
    Chat,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Overview, Section::Train, Section::Chat];

    pub fn label(self) -> &'static str {
        match self {
            Section::Overview => "Analysis",
            Section::Train => "Train",
            Section::Chat => "Chatbot",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::Overview => "Dataset Analysis",
            Section::Train => "Train AI Model",
            Section::Chat => "Smart Chatbot",
        }
    }
}

/// Visibility state only. Nothing here owns or touches analysis data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    active_section: Section,
    sidebar_open: bool,
    json_modal_open: bool,
}

impl ViewState {
    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn json_modal_open(&self) -> bool {
        self.json_modal_open
    }

    pub fn show_section(&mut self, section: Section) {
        self.active_section = section;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// The preview has nothing to show until a result set exists.
    pub fn open_json_modal(&mut self, has_results: bool) -> bool {
        self.json_modal_open = has_results;
        self.json_modal_open
    }

    pub fn close_json_modal(&mut self) {
        self.json_modal_open = false;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self { active_section: Section::Overview, sidebar_open: true, json_modal_open: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let view = ViewState::default();
        assert_eq!(view.active_section(), Section::Overview);
        assert!(view.sidebar_open());
        assert!(!view.json_modal_open());
    }

    #[test]
    fn sidebar_toggles() {
        let mut view = ViewState::default();
        view.toggle_sidebar();
        assert!(!view.sidebar_open());
        view.toggle_sidebar();
        assert!(view.sidebar_open());
    }

    #[test]
    fn json_modal_needs_results() {
        let mut view = ViewState::default();
        assert!(!view.open_json_modal(false));
        assert!(view.open_json_modal(true));
        view.close_json_modal();
        assert!(!view.json_modal_open());
    }
}
