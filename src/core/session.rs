//! Application state for one operator session.
//!
//! Every field has a single writer: the session itself, driven by
//! [`Action`]s from the UI and [`TaskResult`]s from background work. Views
//! read through [`SessionView`] and never mutate.

use std::{
    collections::VecDeque,
    sync::Arc,
};

use super::{
    aggregate::{
        aggregate,
        AggregateStats,
    },
    errors::GuardRejection,
    models::{
        FileSet,
        ResultSet,
    },
    narration::{
        narration_text,
        NarrationController,
        NarrationState,
    },
    submission::{
        Completion,
        SubmissionController,
    },
    tasks::{
        TaskManager,
        TaskResult,
    },
    view_state::{
        Section,
        ViewState,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetInstruction(String),
    SelectFiles(FileSet),
    Submit,
    Narrate { index: usize },
    ShowSection(Section),
    ToggleSidebar,
    OpenJsonModal,
    CloseJsonModal,
    DismissNotice,
}

/// A message the operator has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

pub struct Session {
    instruction: String,
    files: FileSet,
    submission: SubmissionController,
    narration: NarrationController,
    view: ViewState,
    notices: VecDeque<Notice>,
}

/// Read-only projection handed to rendering code.
pub struct SessionView<'a> {
    pub instruction: &'a str,
    pub files: &'a FileSet,
    pub results: &'a Arc<ResultSet>,
    pub is_submitting: bool,
    pub narration: NarrationState,
    pub view: &'a ViewState,
    pub notice: Option<&'a Notice>,
}

impl SessionView<'_> {
    pub fn is_speaking(&self) -> bool {
        self.narration != NarrationState::Idle
    }

    /// Recomputed on every call; result sets are small and replaced wholesale.
    pub fn stats(&self) -> AggregateStats {
        aggregate(self.results)
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

impl Session {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            files: FileSet::default(),
            submission: SubmissionController::new(),
            narration: NarrationController::new(),
            view: ViewState::default(),
            notices: VecDeque::new(),
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            instruction: &self.instruction,
            files: &self.files,
            results: self.submission.results(),
            is_submitting: self.submission.is_submitting(),
            narration: self.narration.state(),
            view: &self.view,
            notice: self.notices.front(),
        }
    }

    pub fn apply(&mut self, action: Action, tasks: &TaskManager) {
        match action {
            Action::SetInstruction(text) => self.instruction = text,
            Action::SelectFiles(files) => {
                tracing::info!("Selected {} file(s)", files.len());
                self.files = files;
            }
            Action::Submit => self.submit(tasks),
            Action::Narrate { index } => self.narrate(index, tasks),
            Action::ShowSection(section) => self.view.show_section(section),
            Action::ToggleSidebar => self.view.toggle_sidebar(),
            Action::OpenJsonModal => {
                let has_results = !self.submission.results().is_empty();
                self.view.open_json_modal(has_results);
            }
            Action::CloseJsonModal => self.view.close_json_modal(),
            Action::DismissNotice => {
                self.notices.pop_front();
            }
        }
    }

    pub fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Submission { ticket, outcome } => {
                match self.submission.complete(ticket, outcome) {
                    Completion::Applied { .. } | Completion::Stale => {}
                    Completion::Failed(error) => {
                        let message = if error.is_transport() {
                            "The analysis service could not process the batch. Make sure the \
                             backend is running and reachable."
                        } else {
                            "The batch could not be analyzed."
                        };
                        self.notify(Notice {
                            title: "Analysis Error".to_string(),
                            message: message.to_string(),
                            details: Some(error.to_string()),
                        });
                    }
                }
            }
            TaskResult::Narration { ticket, event } => self.narration.handle(ticket, event),
        }
    }

    /// Surfaces an operator-facing message outside the reducer flow, e.g. an
    /// export that could not be written.
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    fn submit(&mut self, tasks: &TaskManager) {
        match self.submission.begin(&self.instruction, &self.files) {
            Ok(request) => tasks.submit_batch(request),
            Err(GuardRejection::NoFiles) => self.notify(Notice {
                title: "No Files Selected".to_string(),
                message: "Please select one or more files first.".to_string(),
                details: None,
            }),
            Err(rejection) => tracing::debug!("Submit ignored: {}", rejection),
        }
    }

    fn narrate(&mut self, index: usize, tasks: &TaskManager) {
        let Some(record) = self.submission.results().get(index) else {
            tracing::debug!("Narration requested for missing item {}", index);
            return;
        };
        let text = narration_text(index, record);

        match self.narration.begin(&text) {
            Ok(ticket) => tasks.narrate(ticket, text),
            Err(rejection) => tracing::debug!("Narration ignored: {}", rejection),
        }
    }
}
