use std::future::Future;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures_util::future::BoxFuture;
use loader_logging::loader_warn;

use crate::EngineError;

type Job<Ev> = BoxFuture<'static, Ev>;

/// Runs fetch futures on a background tokio runtime and hands their results
/// back to the owning thread.
///
/// The owner keeps its state machines to itself and applies every event it
/// receives, so state is only ever touched from one thread.
pub struct EngineHandle<Ev> {
    job_tx: mpsc::Sender<Job<Ev>>,
    event_rx: mpsc::Receiver<Ev>,
}

impl<Ev: Send + 'static> EngineHandle<Ev> {
    pub fn new() -> Result<Self, EngineError> {
        let (job_tx, job_rx) = mpsc::channel::<Job<Ev>>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .build()?;

        thread::Builder::new()
            .name("fetchstate-engine".to_string())
            .spawn(move || {
                while let Ok(job) = job_rx.recv() {
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let _ = event_tx.send(job.await);
                    });
                }
            })?;

        Ok(Self { job_tx, event_rx })
    }

    /// Queues a future; its output comes back through [`try_recv`](Self::try_recv).
    pub fn spawn<Fut>(&self, job: Fut)
    where
        Fut: Future<Output = Ev> + Send + 'static,
    {
        if self.job_tx.send(Box::pin(job)).is_err() {
            loader_warn!("engine thread is gone, job dropped");
        }
    }

    pub fn try_recv(&self) -> Option<Ev> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Ev> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
