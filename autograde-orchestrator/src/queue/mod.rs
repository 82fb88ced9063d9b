//! Job queue
//!
//! A generic, concurrency-bounded queue. Jobs are accepted under a
//! caller-chosen identifier, fed through a channel to a dispatcher, and
//! executed by at most `concurrency` worker tasks at a time. The execution
//! strategy is injected as a [`JobProcessor`] implementation rather than a
//! closure captured at construction.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore, mpsc};
use tracing::{debug, info, warn};

use autograde_core::error::{CoreError, Result};

/// Strategy invoked once per dispatched job
#[async_trait]
pub trait JobProcessor<T: Send + Sync + 'static>: Send + Sync + 'static {
    /// Readiness probe consulted by [`JobQueue::init`]; a queue will not
    /// accept work while its processor's backing store is unreachable
    async fn ready(&self) -> Result<()>;

    /// Runs one job to completion
    async fn process(&self, job: &Job<T>) -> Result<()>;
}

/// Options supplied at enqueue time
#[derive(Debug, Clone)]
pub struct JobOpts {
    /// Stable identifier; re-adding an identifier still in the active set
    /// is a resubmission and does not enqueue a duplicate
    pub job_id: String,
    /// Keep the identifier in the active set after the job finishes,
    /// suppressing any later resubmission of the same identifier
    pub retain_on_complete: bool,
}

/// A queued unit of work
#[derive(Debug, Clone)]
pub struct Job<T> {
    pub id: String,
    pub payload: T,
    pub retain_on_complete: bool,
}

/// Handle to an accepted job
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub id: String,
}

/// Queue lifecycle state
enum State<T> {
    Uninitialized,
    Initializing,
    Ready(mpsc::UnboundedSender<Job<T>>),
    Closed,
}

/// Queued + running counters shared with the dispatcher
#[derive(Default)]
struct Counters {
    queued: AtomicUsize,
    running: AtomicUsize,
}

pub struct JobQueue<T: Send + Sync + 'static> {
    name: String,
    concurrency: usize,
    processor: Arc<dyn JobProcessor<T>>,
    state: Mutex<State<T>>,
    // One semaphore for the lifetime of the instance: jobs draining from a
    // pre-close dispatcher and jobs from a re-init share the same ceiling
    semaphore: Arc<Semaphore>,
    counters: Arc<Counters>,
    active: Arc<Mutex<HashSet<String>>>,
}

impl<T: Send + Sync + 'static> JobQueue<T> {
    /// Creates a queue; a `concurrency` of 0 means jobs only accumulate
    /// and are never dispatched
    pub fn new(
        name: impl Into<String>,
        concurrency: usize,
        processor: Arc<dyn JobProcessor<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            concurrency,
            processor,
            state: Mutex::new(State::Uninitialized),
            semaphore: Arc::new(Semaphore::new(concurrency)),
            counters: Arc::new(Counters::default()),
            active: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Idempotent initialization
    ///
    /// Probes the processor's backing store and spawns the dispatcher.
    /// A second call while already ready is a no-op; after `close()` an
    /// explicit (or lazy, via `add`) call transitions back to ready.
    pub async fn init(&self) -> Result<()> {
        let mut state = self.state.lock().await;

        if let State::Ready(_) = *state {
            return Ok(());
        }

        *state = State::Initializing;

        if let Err(err) = self.processor.ready().await {
            *state = State::Uninitialized;
            return Err(CoreError::QueueUnavailable(format!(
                "failed to start job queue '{}': {}",
                self.name, err
            )));
        }

        let (tx, rx) = mpsc::unbounded_channel();

        let semaphore = Arc::clone(&self.semaphore);
        let processor = Arc::clone(&self.processor);
        let counters = Arc::clone(&self.counters);
        let active = Arc::clone(&self.active);
        let name = self.name.clone();

        tokio::spawn(dispatch_loop(name, rx, semaphore, processor, counters, active));

        *state = State::Ready(tx);
        info!("Job queue '{}' ready (concurrency: {})", self.name, self.concurrency);
        Ok(())
    }

    /// Enqueues a payload under the identifier in `opts`
    ///
    /// Lazily initializes the queue if needed, including after `close()`.
    pub async fn add(&self, payload: T, opts: JobOpts) -> Result<JobHandle> {
        let tx = match self.sender().await {
            Some(tx) => tx,
            None => {
                self.init().await?;
                self.sender()
                    .await
                    .ok_or_else(|| CoreError::QueueUnavailable("queue closed during add".to_string()))?
            }
        };

        {
            let mut active = self.active.lock().await;
            if active.contains(&opts.job_id) {
                debug!("Job '{}' already active, treating add as resubmission", opts.job_id);
                return Ok(JobHandle { id: opts.job_id });
            }
            active.insert(opts.job_id.clone());
        }

        let job = Job {
            id: opts.job_id.clone(),
            payload,
            retain_on_complete: opts.retain_on_complete,
        };

        self.counters.queued.fetch_add(1, Ordering::SeqCst);
        if tx.send(job).is_err() {
            self.counters.queued.fetch_sub(1, Ordering::SeqCst);
            self.active.lock().await.remove(&opts.job_id);
            return Err(CoreError::QueueUnavailable(
                "queue dispatcher is gone".to_string(),
            ));
        }

        info!("Added job '{}'", opts.job_id);
        Ok(JobHandle { id: opts.job_id })
    }

    /// Current backlog: queued + running
    pub fn count(&self) -> usize {
        self.counters.queued.load(Ordering::SeqCst) + self.counters.running.load(Ordering::SeqCst)
    }

    /// Whether the queue is currently accepting work without re-init
    pub async fn is_ready(&self) -> bool {
        matches!(*self.state.lock().await, State::Ready(_))
    }

    /// Stops accepting new work
    ///
    /// Jobs already accepted drain per the dispatcher's own pace; nothing
    /// in flight is forcibly terminated. `add` after close lazily re-inits.
    pub async fn close(&self) {
        info!("Closing job queue '{}'", self.name);
        let mut state = self.state.lock().await;
        // Dropping the sender lets the dispatcher drain and exit
        *state = State::Closed;
    }

    async fn sender(&self) -> Option<mpsc::UnboundedSender<Job<T>>> {
        match &*self.state.lock().await {
            State::Ready(tx) => Some(tx.clone()),
            _ => None,
        }
    }
}

/// Pulls jobs off the channel and runs them under the concurrency ceiling
async fn dispatch_loop<T: Send + Sync + 'static>(
    name: String,
    mut rx: mpsc::UnboundedReceiver<Job<T>>,
    semaphore: Arc<Semaphore>,
    processor: Arc<dyn JobProcessor<T>>,
    counters: Arc<Counters>,
    active: Arc<Mutex<HashSet<String>>>,
) {
    while let Some(job) = rx.recv().await {
        // With concurrency 0 this never resolves and jobs accumulate
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };

        counters.queued.fetch_sub(1, Ordering::SeqCst);
        counters.running.fetch_add(1, Ordering::SeqCst);

        let processor = Arc::clone(&processor);
        let counters = Arc::clone(&counters);
        let active = Arc::clone(&active);

        tokio::spawn(async move {
            let job_id = job.id.clone();
            match processor.process(&job).await {
                Ok(()) => debug!("Job '{}' completed", job_id),
                Err(err) => warn!("Job '{}' failed: {}", job_id, err),
            }

            counters.running.fetch_sub(1, Ordering::SeqCst);
            if !job.retain_on_complete {
                active.lock().await.remove(&job_id);
            }
            drop(permit);
        });
    }

    debug!("Dispatcher for queue '{}' exited", name);
}
