use std::sync::Arc;

use super::{
    errors::{
        DatacleanError,
        GuardRejection,
    },
    models::{
        FileSet,
        ResultSet,
    },
};

/// Identifies one dispatched batch so its completion can be matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight { ticket: SubmissionTicket, file_count: usize },
}

/// Everything the dispatcher needs to build one multipart request.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub ticket: SubmissionTicket,
    pub instruction: String,
    pub files: FileSet,
}

#[derive(Debug)]
pub enum Completion {
    Applied { count: usize },
    Failed(DatacleanError),
    Stale,
}

/// Owns the result set and the single in-flight submission slot.
pub struct SubmissionController {
    state: SubmissionState,
    results: Arc<ResultSet>,
    next_ticket: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self { state: SubmissionState::Idle, results: Arc::new(Vec::new()), next_ticket: 1 }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::InFlight { .. })
    }

    pub fn results(&self) -> &Arc<ResultSet> {
        &self.results
    }

    /// Moves to `InFlight` and hands back the request to dispatch.
    pub fn begin(
        &mut self,
        instruction: &str,
        files: &FileSet,
    ) -> Result<BatchRequest, GuardRejection> {
        if self.is_submitting() {
            return Err(GuardRejection::SubmissionInFlight);
        }
        if files.is_empty() {
            return Err(GuardRejection::NoFiles);
        }

        let ticket = SubmissionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = SubmissionState::InFlight { ticket, file_count: files.len() };

        tracing::info!("Submitting {} file(s) for analysis", files.len());
        Ok(BatchRequest { ticket, instruction: instruction.to_string(), files: files.clone() })
    }

    /// Applies the outcome of the in-flight request. On success the result set
    /// is swapped in one assignment; on failure the previous `Arc` is kept.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<ResultSet, DatacleanError>,
    ) -> Completion {
        match self.state {
            SubmissionState::InFlight { ticket: current, .. } if current == ticket => {}
            _ => {
                tracing::warn!("Ignoring completion for unknown submission {:?}", ticket);
                return Completion::Stale;
            }
        }

        self.state = SubmissionState::Idle;
        match outcome {
            Ok(results) => {
                let count = results.len();
                self.results = Arc::new(results);
                tracing::info!("Analysis finished with {} result(s)", count);
                Completion::Applied { count }
            }
            Err(error) => {
                tracing::error!("Analysis submission failed: {}", error);
                Completion::Failed(error)
            }
        }
    }
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        ResultRecord,
        SelectedFile,
    };

    fn one_file() -> FileSet {
        FileSet::new(vec![SelectedFile::in_memory("a.csv", b"x,y\n1,2\n".to_vec())])
    }

    #[test]
    fn empty_file_set_is_rejected_without_state_change() {
        let mut controller = SubmissionController::new();
        let before = Arc::clone(controller.results());

        let rejected = controller.begin("prompt", &FileSet::default());

        assert_eq!(rejected.unwrap_err(), GuardRejection::NoFiles);
        assert!(!controller.is_submitting());
        assert!(Arc::ptr_eq(&before, controller.results()));
    }

    #[test]
    fn second_begin_while_in_flight_is_rejected() {
        let mut controller = SubmissionController::new();
        let first = controller.begin("prompt", &one_file()).unwrap();

        assert_eq!(
            controller.begin("prompt", &one_file()).unwrap_err(),
            GuardRejection::SubmissionInFlight
        );
        assert_eq!(controller.state(), SubmissionState::InFlight { ticket: first.ticket, file_count: 1 });
    }

    #[test]
    fn success_replaces_previous_results() {
        let mut controller = SubmissionController::new();

        let request = controller.begin("prompt", &one_file()).unwrap();
        controller.complete(request.ticket, Ok(vec![ResultRecord::new("old.csv", None)]));

        let request = controller.begin("prompt", &one_file()).unwrap();
        let completion = controller.complete(request.ticket, Ok(vec![ResultRecord::new("new.csv", None)]));

        assert!(matches!(completion, Completion::Applied { count: 1 }));
        assert_eq!(controller.results().len(), 1);
        assert_eq!(controller.results()[0].filename, "new.csv");
        assert!(!controller.is_submitting());
    }

    #[test]
    fn failure_keeps_the_identical_result_set() {
        let mut controller = SubmissionController::new();
        let request = controller.begin("prompt", &one_file()).unwrap();
        controller.complete(request.ticket, Ok(vec![ResultRecord::new("kept.csv", None)]));
        let before = Arc::clone(controller.results());

        let request = controller.begin("prompt", &one_file()).unwrap();
        let completion = controller.complete(
            request.ticket,
            Err(DatacleanError::HttpStatus { status: 500, url: "http://test".to_string() }),
        );

        assert!(matches!(completion, Completion::Failed(_)));
        assert!(Arc::ptr_eq(&before, controller.results()));
        assert!(!controller.is_submitting());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut controller = SubmissionController::new();
        let first = controller.begin("prompt", &one_file()).unwrap();
        controller.complete(first.ticket, Ok(Vec::new()));

        let second = controller.begin("prompt", &one_file()).unwrap();
        let completion = controller.complete(first.ticket, Ok(vec![ResultRecord::new("x", None)]));

        assert!(matches!(completion, Completion::Stale));
        assert!(controller.is_submitting());
        assert!(controller.results().is_empty());
        controller.complete(second.ticket, Ok(Vec::new()));
    }
}
