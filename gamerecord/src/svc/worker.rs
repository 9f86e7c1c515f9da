use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::anyhow;

use crate::app::games::Game;
use crate::svc::{Backend, RecordPayload};

// How often an idle worker checks whether it must stop
const TASK_WAKEUP_PERIOD: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Request {
    FetchGames,
    SubmitRecord(RecordPayload),
}

#[derive(Debug)]
pub enum Completion {
    GamesFetched(anyhow::Result<Vec<Game>>),
    RecordSubmitted(anyhow::Result<()>),
}

impl Completion {
    /// The failed outcome of `request`.
    pub fn failed(request: &Request, e: anyhow::Error) -> Self {
        match request {
            Request::FetchGames => Completion::GamesFetched(Err(e)),
            Request::SubmitRecord(_) => Completion::RecordSubmitted(Err(e)),
        }
    }
}

#[derive(Default, Debug)]
struct Stats {
    request_count: usize,
    completion_count: usize,
    discarded_count: usize,
}

/// Runs backend requests on a dedicated thread, in submission order.
///
/// Completions are collected with [`RequestWorker::poll`]. Once the worker is
/// stopped, requests still in flight finish but their completions are dropped.
pub struct RequestWorker {
    thread: Option<JoinHandle<Stats>>,
    continue_running: Arc<AtomicBool>,
    requests: Sender<Request>,
    completions: Receiver<Completion>,
}

impl RequestWorker {
    /// The backend is built on the worker thread and never leaves it.
    pub fn new<B, F>(make_backend: F) -> anyhow::Result<Self>
    where
        B: Backend + 'static,
        F: FnOnce() -> anyhow::Result<B> + Send + 'static,
    {
        let (requests, requests_rx) = channel();
        let (completions_tx, completions) = channel();
        let continue_running = Arc::new(AtomicBool::new(true));

        log::info!("Starting request worker");

        let thread = spawn_thread(
            make_backend,
            requests_rx,
            completions_tx,
            continue_running.clone(),
        )?;

        Ok(RequestWorker {
            thread: Some(thread),
            continue_running,
            requests,
            completions,
        })
    }

    pub fn dispatch(&self, request: Request) -> anyhow::Result<()> {
        log::debug!("dispatch {:?}", request);
        self.requests
            .send(request)
            .map_err(|_| anyhow!("Request worker is not running"))
    }

    pub fn poll(&self) -> Option<Completion> {
        self.completions.try_recv().ok()
    }

    /// False once the thread has exited, for instance after a backend panic.
    pub fn is_alive(&self) -> bool {
        self.thread
            .as_ref()
            .map(|thread| !thread.is_finished())
            .unwrap_or(false)
    }

    fn stop(&mut self) -> Option<Stats> {
        self.continue_running.store(false, Ordering::Release);

        let thread = self.thread.take()?;

        // A blocking request cannot be interrupted, so only join a thread that
        // already wound down. The other one exits after its current request.
        if thread.is_finished() {
            thread.join().ok()
        } else {
            log::debug!("request worker still busy, detaching");
            None
        }
    }
}

impl Drop for RequestWorker {
    fn drop(&mut self) {
        if let Some(stats) = self.stop() {
            log::debug!("stats: {:?}", stats);
        }
    }
}

fn spawn_thread<B, F>(
    make_backend: F,
    requests: Receiver<Request>,
    completions: Sender<Completion>,
    continue_running: Arc<AtomicBool>,
) -> anyhow::Result<JoinHandle<Stats>>
where
    B: Backend + 'static,
    F: FnOnce() -> anyhow::Result<B> + Send + 'static,
{
    let thread = std::thread::Builder::new()
        .name("request-worker".to_owned())
        .spawn(move || {
            let mut stats = Stats::default();

            let backend = make_backend();
            if let Err(e) = &backend {
                log::error!("Cannot create backend: {e:#}");
            }

            while continue_running.load(Ordering::Acquire) {
                let request = match requests.recv_timeout(TASK_WAKEUP_PERIOD) {
                    Ok(request) => request,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                stats.request_count += 1;

                let completion = match &backend {
                    Ok(backend) => execute(backend, &request),
                    Err(e) => {
                        Completion::failed(&request, anyhow!("Backend unavailable: {e:#}"))
                    }
                };

                if !continue_running.load(Ordering::Acquire) {
                    log::debug!("discarding {:?}", completion);
                    stats.discarded_count += 1;
                    break;
                }

                if completions.send(completion).is_err() {
                    stats.discarded_count += 1;
                    break;
                }

                stats.completion_count += 1;
            }

            stats
        })?;

    Ok(thread)
}

fn execute<B: Backend>(backend: &B, request: &Request) -> Completion {
    match request {
        Request::FetchGames => Completion::GamesFetched(backend.fetch_games()),
        Request::SubmitRecord(record) => {
            Completion::RecordSubmitted(backend.submit_record(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::sync_channel;
    use std::sync::Mutex;
    use std::time::Instant;

    use crate::app::games::Platform;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeBackend {
        records: Arc<Mutex<Vec<RecordPayload>>>,
    }

    impl Backend for FakeBackend {
        fn fetch_games(&self) -> anyhow::Result<Vec<Game>> {
            Ok(vec![Game {
                id: 7,
                title: "Game G".to_owned(),
                platform: Platform::Playstation,
            }])
        }

        fn submit_record(&self, record: &RecordPayload) -> anyhow::Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn wait_completion(worker: &RequestWorker) -> Completion {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(completion) = worker.poll() {
                return completion;
            }
            assert!(Instant::now() < deadline, "no completion");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test_log::test]
    fn test_requests_complete_in_order() {
        let backend = FakeBackend::default();
        let records = backend.records.clone();
        let worker = RequestWorker::new(move || Ok(backend)).unwrap();

        worker.dispatch(Request::FetchGames).unwrap();
        worker
            .dispatch(Request::SubmitRecord(RecordPayload::default()))
            .unwrap();

        match wait_completion(&worker) {
            Completion::GamesFetched(Ok(games)) => assert_eq!(games[0].id, 7),
            other => panic!("unexpected {:?}", other),
        }
        match wait_completion(&worker) {
            Completion::RecordSubmitted(Ok(())) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(records.lock().unwrap().len(), 1);
    }

    #[test_log::test]
    fn test_backend_creation_failure_fails_requests() {
        let worker =
            RequestWorker::new(|| -> anyhow::Result<FakeBackend> { Err(anyhow!("no client")) })
                .unwrap();

        worker.dispatch(Request::FetchGames).unwrap();

        match wait_completion(&worker) {
            Completion::GamesFetched(Err(e)) => assert!(e.to_string().contains("no client")),
            other => panic!("unexpected {:?}", other),
        }
    }

    struct GatedBackend {
        started: std::sync::mpsc::SyncSender<()>,
        release: Mutex<Receiver<()>>,
    }

    impl Backend for GatedBackend {
        fn fetch_games(&self) -> anyhow::Result<Vec<Game>> {
            self.started.send(()).ok();
            self.release.lock().unwrap().recv().ok();
            Ok(Vec::new())
        }

        fn submit_record(&self, _record: &RecordPayload) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test_log::test]
    fn test_stopped_worker_discards_in_flight_completion() {
        let (started_tx, started_rx) = sync_channel(1);
        let (release_tx, release_rx) = channel();
        let continue_running = Arc::new(AtomicBool::new(true));
        let (requests, requests_rx) = channel();
        let (completions_tx, completions) = channel();

        let backend = GatedBackend {
            started: started_tx,
            release: Mutex::new(release_rx),
        };
        let thread = spawn_thread(
            move || Ok(backend),
            requests_rx,
            completions_tx,
            continue_running.clone(),
        )
        .unwrap();

        requests.send(Request::FetchGames).unwrap();
        started_rx.recv().unwrap();

        continue_running.store(false, Ordering::Release);
        release_tx.send(()).unwrap();

        let stats = thread.join().unwrap();
        assert_eq!(stats.request_count, 1);
        assert_eq!(stats.discarded_count, 1);
        assert_eq!(stats.completion_count, 0);
        assert!(completions.try_recv().is_err());
    }

    struct PanickingBackend;

    impl Backend for PanickingBackend {
        fn fetch_games(&self) -> anyhow::Result<Vec<Game>> {
            panic!("backend bug");
        }

        fn submit_record(&self, _record: &RecordPayload) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test_log::test]
    fn test_panicking_backend_stops_worker() {
        let worker = RequestWorker::new(|| Ok(PanickingBackend)).unwrap();
        assert!(worker.is_alive());

        worker.dispatch(Request::FetchGames).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while worker.is_alive() {
            assert!(Instant::now() < deadline, "worker still alive");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(worker.poll().is_none());
        assert!(worker.dispatch(Request::FetchGames).is_err());
    }

    #[test]
    fn test_failed_completion_matches_request() {
        match Completion::failed(&Request::FetchGames, anyhow!("down")) {
            Completion::GamesFetched(Err(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        let submit = Request::SubmitRecord(RecordPayload::default());
        match Completion::failed(&submit, anyhow!("down")) {
            Completion::RecordSubmitted(Err(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
