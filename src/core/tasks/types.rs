use crate::core::{
    narration::{
        NarrationEvent,
        NarrationTicket,
    },
    submission::SubmissionTicket,
    DatacleanError,
    ResultSet,
};

pub type SubmissionOutcome = Result<ResultSet, DatacleanError>;

/// Completion signals from background work, delivered in send order.
#[derive(Debug)]
pub enum TaskResult {
    Submission { ticket: SubmissionTicket, outcome: SubmissionOutcome },
    Narration { ticket: NarrationTicket, event: NarrationEvent },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Submission { .. } => "submission",
            TaskResult::Narration { event, .. } => match event {
                NarrationEvent::Playing => "narration_playing",
                NarrationEvent::Finished => "narration_finished",
                NarrationEvent::Failed(_) => "narration_failed",
            },
        }
    }
}
