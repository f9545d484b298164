use crate::core::Action;

// Widgets push actions here instead of mutating the session; the app applies
// them once rendering for the frame is done.
pub struct ActionQueue {
    actions: Vec<Action>,
}

/// Export work that only reads the result set and so bypasses the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRequest {
    Copy,
    Download,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Action> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
