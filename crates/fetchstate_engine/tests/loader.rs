use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use fetchstate_core::{Phase, ResourceState};
use fetchstate_engine::{ApiSettings, DemoApi, Fetcher, ResourceLoader, UserFetcher};
use pretty_assertions::assert_eq;
use tokio::sync::Semaphore;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(loader_logging::initialize_for_tests);
}

/// Fetcher that blocks until the test opens its gate, then replays scripted
/// outcomes.
struct GatedFetcher {
    gate: Semaphore,
    calls: AtomicUsize,
    outcomes: Mutex<VecDeque<Result<u32, String>>>,
}

impl GatedFetcher {
    fn closed(outcomes: Vec<Result<u32, String>>) -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
            outcomes: Mutex::new(outcomes.into()),
        }
    }

    fn open(outcomes: Vec<Result<u32, String>>) -> Self {
        let fetcher = Self::closed(outcomes);
        fetcher.release();
        fetcher
    }

    fn release(&self) {
        self.gate.add_permits(1024);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for GatedFetcher {
    type Value = u32;
    type Error = String;

    async fn fetch(&self) -> Result<u32, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Suspend at least once so concurrent callers observe the in-flight phase.
        tokio::task::yield_now().await;
        let _permit = self.gate.acquire().await.map_err(|err| err.to_string())?;
        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err("no scripted outcome".to_string()))
    }
}

struct PanickingFetcher;

#[async_trait::async_trait]
impl Fetcher for PanickingFetcher {
    type Value = u32;
    type Error = String;

    async fn fetch(&self) -> Result<u32, String> {
        tokio::task::yield_now().await;
        panic!("fetcher blew up");
    }
}

fn slow_user_loader() -> (Arc<DemoApi>, ResourceLoader<UserFetcher>) {
    let api = Arc::new(DemoApi::new(ApiSettings {
        latency: Duration::from_millis(200),
        page_size: 1,
    }));
    let loader = ResourceLoader::new("user", UserFetcher::new(Arc::clone(&api)));
    (api, loader)
}

const SHORT: Duration = Duration::from_millis(20);

async fn wait_until_in_flight<F: Fetcher>(loader: &ResourceLoader<F>) {
    while !loader.phase().is_in_flight() {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn load_walks_initial_failure_retry_success() {
    init_logging();
    let loader = ResourceLoader::new(
        "user",
        GatedFetcher::open(vec![Err("down".to_string()), Ok(1)]),
    );
    assert_eq!(loader.state(), ResourceState::Idle);

    assert!(loader.load().await);
    assert_eq!(loader.state(), ResourceState::LoadingFailure("down".to_string()));

    assert!(loader.load().await);
    assert_eq!(loader.state(), ResourceState::Success(1));
    assert_eq!(loader.fetcher().calls(), 2);
}

#[tokio::test]
async fn failed_reload_keeps_previous_value() {
    init_logging();
    let loader = ResourceLoader::new(
        "user",
        GatedFetcher::open(vec![Ok(1), Err("flaky".to_string()), Err("still".to_string())]),
    );

    loader.load().await;
    loader.load().await;
    assert_eq!(
        loader.state(),
        ResourceState::ReloadingFailure {
            value: 1,
            error: "flaky".to_string()
        }
    );

    loader.load().await;
    assert_eq!(
        loader.state(),
        ResourceState::ReloadingFailure {
            value: 1,
            error: "still".to_string()
        }
    );
}

#[tokio::test]
async fn reentrant_loads_are_rejected_while_outstanding() {
    init_logging();
    let loader = ResourceLoader::new("user", GatedFetcher::closed(vec![Ok(7)]));

    let (issued, rejected) = tokio::join!(loader.load(), async {
        wait_until_in_flight(&loader).await;
        assert_eq!(loader.phase(), Phase::InitialLoading);
        let mut rejected = 0;
        for _ in 0..5 {
            if !loader.load().await {
                rejected += 1;
            }
        }
        loader.fetcher().release();
        rejected
    });

    assert!(issued);
    assert_eq!(rejected, 5);
    assert_eq!(loader.fetcher().calls(), 1);
    assert_eq!(loader.state(), ResourceState::Success(7));
}

#[tokio::test]
async fn interleaved_loads_on_one_thread_fetch_once() {
    init_logging();
    let loader = ResourceLoader::new("user", GatedFetcher::open(vec![Ok(3)]));

    let results = futures_util::future::join_all((0..8).map(|_| loader.load())).await;

    assert_eq!(results.iter().filter(|issued| **issued).count(), 1);
    assert_eq!(loader.fetcher().calls(), 1);
    assert_eq!(loader.state(), ResourceState::Success(3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn loads_from_many_tasks_fetch_once() {
    init_logging();
    let loader = Arc::new(ResourceLoader::new("user", GatedFetcher::closed(vec![Ok(9)])));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loader = Arc::clone(&loader);
            tokio::spawn(async move { loader.load().await })
        })
        .collect();

    // Every task but the one holding the fetch returns without waiting.
    while handles.iter().filter(|handle| handle.is_finished()).count() < handles.len() - 1 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    loader.fetcher().release();

    let mut issued = 0;
    for handle in handles {
        if handle.await.unwrap() {
            issued += 1;
        }
    }
    assert_eq!(issued, 1);
    assert_eq!(loader.fetcher().calls(), 1);
    assert_eq!(loader.state(), ResourceState::Success(9));
}

#[tokio::test]
async fn cancelled_first_load_returns_to_idle_and_next_load_fetches() {
    init_logging();
    let (api, loader) = slow_user_loader();

    assert!(tokio::time::timeout(SHORT, loader.load()).await.is_err());
    assert_eq!(loader.phase(), Phase::Idle);

    assert!(loader.load().await);
    assert!(loader.state().is_success());
    assert_eq!(api.request_count(), 2);
}

#[tokio::test]
async fn cancelled_reload_keeps_value_and_next_load_fetches() {
    init_logging();
    let (api, loader) = slow_user_loader();
    loader.load().await;

    assert!(tokio::time::timeout(SHORT, loader.load()).await.is_err());
    assert_eq!(loader.phase(), Phase::Success);
    assert_eq!(
        loader.state().value().map(|user| user.name.clone()),
        Some("kntk".to_string())
    );

    assert!(loader.load().await);
    assert_eq!(api.request_count(), 3);
}

#[tokio::test]
async fn cancelled_retry_returns_to_loading_failure() {
    init_logging();
    let (api, loader) = slow_user_loader();
    api.set_throw_error(true);
    loader.load().await;
    api.set_throw_error(false);

    assert!(tokio::time::timeout(SHORT, loader.load()).await.is_err());
    assert_eq!(loader.phase(), Phase::LoadingFailure);

    assert!(loader.load().await);
    assert!(loader.state().is_success());
}

#[tokio::test]
async fn panicking_fetcher_does_not_wedge_the_loader() {
    init_logging();
    let loader = Arc::new(ResourceLoader::new("user", PanickingFetcher));

    let task = tokio::spawn({
        let loader = Arc::clone(&loader);
        async move { loader.load().await }
    });

    assert!(task.await.unwrap_err().is_panic());
    assert_eq!(loader.phase(), Phase::Idle);
}
