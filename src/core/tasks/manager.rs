use std::{
    sync::{
        mpsc,
        Arc,
    },
    time::Duration,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        narration::{
            NarrationEvent,
            NarrationTicket,
        },
        submission::BatchRequest,
        DatacleanError,
        ResultSet,
    },
    services::{
        FilePart,
        Services,
    },
};

type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Runs network and playback work off the UI thread. Each operation reports
/// back through the channel; the owner drains it with [`poll_results`].
///
/// [`poll_results`]: TaskManager::poll_results
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    services: Services,
    notifier: Option<Notifier>,
}

impl TaskManager {
    pub fn new(services: Services) -> Result<Self, DatacleanError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, services, notifier: None })
    }

    /// Called after every message so an idle UI wakes up to handle it.
    pub fn with_notifier(mut self, notifier: impl Fn() + Send + Sync + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn poll_results(&self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    pub fn wait_for_result(&self, timeout: Duration) -> Option<TaskResult> {
        self.receiver.recv_timeout(timeout).ok()
    }

    fn task_context(&self) -> (Reporter, Services) {
        (Reporter { sender: self.sender.clone(), notifier: self.notifier.clone() }, self.services.clone())
    }

    pub fn submit_batch(&self, request: BatchRequest) {
        let (reporter, services) = self.task_context();

        self.runtime.spawn(async move {
            let ticket = request.ticket;
            let outcome = run_batch(&services, request).await;
            reporter.send(TaskResult::Submission { ticket, outcome });
        });
    }

    pub fn narrate(&self, ticket: NarrationTicket, text: String) {
        let (reporter, services) = self.task_context();

        self.runtime.spawn(async move {
            let clip = match services.speech.synthesize(text).await {
                Ok(clip) => clip,
                Err(error) => {
                    reporter.send(TaskResult::Narration { ticket, event: NarrationEvent::Failed(error) });
                    return;
                }
            };

            reporter.send(TaskResult::Narration { ticket, event: NarrationEvent::Playing });

            let audio = Arc::clone(&services.audio);
            let played = tokio::task::spawn_blocking(move || audio.play_to_end(clip))
                .await
                .unwrap_or_else(|e| Err(DatacleanError::Audio(format!("Playback task failed: {e}"))));

            let event = match played {
                Ok(()) => NarrationEvent::Finished,
                Err(error) => NarrationEvent::Failed(error),
            };
            reporter.send(TaskResult::Narration { ticket, event });
        });
    }
}

#[derive(Clone)]
struct Reporter {
    sender: mpsc::Sender<TaskResult>,
    notifier: Option<Notifier>,
}

impl Reporter {
    fn send(&self, result: TaskResult) {
        tracing::debug!("Task finished: {}", result.task_type());
        let _ = self.sender.send(result);
        if let Some(notify) = &self.notifier {
            notify();
        }
    }
}

/// Reads every selected file and performs exactly one request. A file that
/// cannot be read fails the whole batch before anything is sent.
async fn run_batch(services: &Services, request: BatchRequest) -> Result<ResultSet, DatacleanError> {
    let mut parts = Vec::with_capacity(request.files.len());
    for file in request.files.iter() {
        let bytes = file.read_bytes().await.map_err(|e| {
            DatacleanError::Custom(format!("Could not read {}: {}", file.name, e))
        })?;
        parts.push(FilePart { name: file.name.clone(), mime_type: file.mime_type.clone(), bytes });
    }

    let response = services.analysis.analyze_batch(request.instruction, parts).await?;
    Ok(response.results)
}
