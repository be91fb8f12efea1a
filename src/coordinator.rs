use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::decrypt::{self, Outcome, PdfEngine};
use crate::discovery::{self, FileTask, SelectionMode};
use crate::error::{DiscoveryError, StartError};
use crate::event::{self, EventFeed, EventSink, LogLevel};
use crate::progress::RunProgress;
use crate::utils;

/// Everything a run needs, fixed when the run starts.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub path: PathBuf,
    pub mode: SelectionMode,
    pub password: String,
}

/// What the worker thread hands back when a run is over.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<(FileTask, Outcome)>,
    pub completed: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Owns the worker thread, the event channel and the ready gate.
pub struct Coordinator<E: PdfEngine> {
    engine: Arc<E>,
    sink: EventSink,
    progress: RunProgress,
    ready: Arc<AtomicBool>,
}

impl<E: PdfEngine> Coordinator<E> {
    /// Build a coordinator and the feed its observer drains.
    pub fn new(engine: E, poll_interval: Duration) -> (Self, EventFeed) {
        let (sink, feed) = event::channel(poll_interval);
        let coordinator = Self {
            engine: Arc::new(engine),
            sink,
            progress: RunProgress::new(),
            ready: Arc::new(AtomicBool::new(true)),
        };
        (coordinator, feed)
    }

    /// True when no run is active and a new one may start.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn progress(&self) -> RunProgress {
        self.progress.clone()
    }

    /// Launch one run on a background thread.
    pub fn start(&self, request: RunRequest) -> Result<JoinHandle<RunSummary>, StartError> {
        if request.path.as_os_str().is_empty() {
            self.sink.error("please select a PDF file or folder");
            return Err(StartError::EmptyPath);
        }
        if self
            .ready
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(StartError::Busy);
        }

        self.progress.reset();
        let worker = Worker {
            engine: Arc::clone(&self.engine),
            sink: self.sink.clone(),
            progress: self.progress.clone(),
        };
        let ready = Arc::clone(&self.ready);
        let sink = self.sink.clone();

        thread::Builder::new()
            .name("pdf-unlock-worker".to_string())
            .spawn(move || {
                let gate = ReadyGate { ready, sink };
                worker.run(&request, gate)
            })
            .map_err(|e| {
                self.ready.store(true, Ordering::Release);
                self.sink.error(format!("could not start processing: {e}"));
                StartError::Spawn(e)
            })
    }
}

/// Announces completion and reopens the gate when the run ends, however it ends.
struct ReadyGate {
    ready: Arc<AtomicBool>,
    sink: EventSink,
}

impl Drop for ReadyGate {
    fn drop(&mut self) {
        self.sink.info("processing complete");
        self.ready.store(true, Ordering::Release);
    }
}

struct Worker<E> {
    engine: Arc<E>,
    sink: EventSink,
    progress: RunProgress,
}

impl<E: PdfEngine> Worker<E> {
    fn run(self, request: &RunRequest, _gate: ReadyGate) -> RunSummary {
        let mut summary = RunSummary::default();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.process_all(request, &mut summary)
        }));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.sink.error(format!("processing error: {e}")),
            Err(payload) => self.sink.error(format!(
                "processing error: {}",
                utils::panic_message(payload.as_ref())
            )),
        }

        summary.completed = self.progress.completed();
        summary.total = self.progress.total();
        summary
    }

    fn process_all(
        &self,
        request: &RunRequest,
        summary: &mut RunSummary,
    ) -> Result<(), DiscoveryError> {
        let tasks = discovery::discover(&request.path, request.mode)?;
        if tasks.is_empty() {
            self.sink.warn("no PDF files found");
            return Ok(());
        }

        let total = tasks.len();
        self.progress.begin(total);
        self.sink.debug(format!(
            "found {total} PDF file(s) in {}",
            request.path.display()
        ));

        for (i, task) in tasks.into_iter().enumerate() {
            let name = task.name();
            self.sink.info(format!("processing: {name}"));

            let outcome = self.unlock(&task, &request.password);
            let (level, message) = describe(&name, &outcome);
            self.sink.emit(level, message);

            self.progress.advance(i + 1);
            tracing::debug!(
                file = %task.path.display(),
                progress = %utils::format_percent(self.progress.percent()),
                "file done"
            );
            summary.results.push((task, outcome));
        }
        Ok(())
    }

    /// Run the decryption unit, turning an engine panic into a failed outcome.
    fn unlock(&self, task: &FileTask, password: &str) -> Outcome {
        let engine = &*self.engine;
        panic::catch_unwind(AssertUnwindSafe(|| {
            decrypt::process(engine, &task.path, password)
        }))
        .unwrap_or_else(|payload| Outcome::Failed(utils::panic_message(payload.as_ref())))
    }
}

/// Log level and message for one file's outcome.
fn describe(name: &str, outcome: &Outcome) -> (LogLevel, String) {
    match outcome {
        Outcome::AlreadyUnencrypted => (LogLevel::Info, format!("{name} is not encrypted")),
        Outcome::PasswordRemoved => (LogLevel::Info, format!("password removed from {name}")),
        Outcome::WrongPassword => (LogLevel::Error, format!("{name} incorrect password")),
        Outcome::Failed(reason) => (
            LogLevel::Error,
            format!("{name} processing failed: {reason}"),
        ),
    }
}
