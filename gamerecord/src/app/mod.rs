pub use screen::{Alert, CatalogState, CreateRecordScreen, Event, SubmitState};

use anyhow::anyhow;

use crate::config::Config;
use crate::svc::{Backend, Completion, HttpBackend, Request, RequestWorker};

pub mod form;
pub mod games;
pub mod screen;

/// The create record screen bound to a live backend.
///
/// Network requests run on a [`RequestWorker`]. Their outcomes are applied
/// to the screen by [`App::update`], which the UI calls from its own loop.
/// Dropping the app unmounts the screen: requests still in flight are
/// abandoned.
pub struct App {
    screen: CreateRecordScreen,
    worker: RequestWorker,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let config = config.clone();
        Self::with_backend(move || HttpBackend::new(&config))
    }

    pub fn with_backend<B, F>(make_backend: F) -> anyhow::Result<Self>
    where
        B: Backend + 'static,
        F: FnOnce() -> anyhow::Result<B> + Send + 'static,
    {
        let worker = RequestWorker::new(make_backend)?;
        let mut app = App {
            screen: CreateRecordScreen::default(),
            worker,
        };

        log::info!("Mount create record screen");
        if let Some(request) = app.screen.mount() {
            app.dispatch(request);
        }

        Ok(app)
    }

    pub fn screen(&self) -> &CreateRecordScreen {
        &self.screen
    }

    pub fn handle(&mut self, event: Event) {
        log::trace!("{:?}", event);

        if let Some(request) = self.screen.handle(event) {
            self.dispatch(request);
        }
    }

    /// A request the worker cannot take fails right away.
    fn dispatch(&mut self, request: Request) {
        if let Err(e) = self.worker.dispatch(request.clone()) {
            self.screen.complete(Completion::failed(&request, e));
        }
    }

    /// Applies finished requests. Returns true if the screen changed.
    pub fn update(&mut self) -> bool {
        // Sampled before draining, so completions sent just before the
        // worker exited are still applied
        let worker_alive = self.worker.is_alive();
        let mut changed = false;

        while let Some(completion) = self.worker.poll() {
            self.screen.complete(completion);
            changed = true;
        }

        if !worker_alive && self.is_busy() {
            self.fail_outstanding();
            changed = true;
        }

        changed
    }

    fn fail_outstanding(&mut self) {
        log::error!("Request worker stopped with requests outstanding");

        if self.screen.catalog_state() == CatalogState::Loading {
            self.screen.complete(Completion::failed(
                &Request::FetchGames,
                anyhow!("Request worker stopped"),
            ));
        }

        if self.screen.submit_state() == SubmitState::Pending {
            self.screen.complete(Completion::RecordSubmitted(Err(anyhow!(
                "Request worker stopped"
            ))));
        }
    }

    pub fn is_busy(&self) -> bool {
        self.screen.catalog_state() == CatalogState::Loading
            || self.screen.submit_state() == SubmitState::Pending
    }
}
