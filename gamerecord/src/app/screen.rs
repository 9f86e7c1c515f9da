use std::collections::VecDeque;

use crate::app::form::{FormState, TextField};
use crate::app::games::{GameCollection, Platform};
use crate::svc::{Completion, Request};

/// Failures surfaced to the user as a modal alert.
#[derive(thiserror::Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum Alert {
    #[error("Erro ao listar os jogos!")]
    GameListFetchFailure,
    #[error("Erro ao salvar informações!")]
    RecordSubmitFailure,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Event {
    TextChanged(TextField, String),
    PlatformSelected(Platform),
    GameSelected(String),
    AlertDismissed,
    Submit,
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending,
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub enum CatalogState {
    #[default]
    Unmounted,
    Loading,
    Loaded,
    Failed,
}

#[derive(Default, Debug)]
pub struct CreateRecordScreen {
    form: FormState,
    games: GameCollection,
    catalog: CatalogState,
    submit: SubmitState,
    alerts: VecDeque<Alert>,
}

impl CreateRecordScreen {
    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn games(&self) -> &GameCollection {
        &self.games
    }

    pub fn catalog_state(&self) -> CatalogState {
        self.catalog
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn alert(&self) -> Option<Alert> {
        self.alerts.front().copied()
    }

    /// The catalog is requested once per screen, whatever the outcome.
    pub fn mount(&mut self) -> Option<Request> {
        if self.catalog != CatalogState::Unmounted {
            return None;
        }

        self.catalog = CatalogState::Loading;
        Some(Request::FetchGames)
    }

    pub fn handle(&mut self, event: Event) -> Option<Request> {
        match event {
            Event::TextChanged(TextField::Name, value) => {
                self.form.name = value;
                None
            }
            Event::TextChanged(TextField::Age, value) => {
                self.form.age = value;
                None
            }
            Event::PlatformSelected(platform) => {
                self.form.platform = Some(platform);
                self.games.filter_by(platform);
                None
            }
            Event::GameSelected(game_id) => {
                self.form.game_id = game_id;
                None
            }
            Event::AlertDismissed => {
                self.alerts.pop_front();
                None
            }
            Event::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> Option<Request> {
        if self.submit == SubmitState::Pending {
            log::warn!("Submit ignored, a record is already being saved");
            return None;
        }

        self.submit = SubmitState::Pending;
        Some(Request::SubmitRecord(self.form.to_payload()))
    }

    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::GamesFetched(Ok(games)) => {
                log::info!("Loaded {} games", games.len());
                self.games = GameCollection::new(games);
                if let Some(platform) = self.form.platform {
                    self.games.filter_by(platform);
                }
                self.catalog = CatalogState::Loaded;
            }
            Completion::GamesFetched(Err(e)) => {
                log::error!("Cannot fetch games: {e:#}");
                self.catalog = CatalogState::Failed;
                self.alerts.push_back(Alert::GameListFetchFailure);
            }
            Completion::RecordSubmitted(Ok(())) => {
                log::info!("Record saved");
                self.submit = SubmitState::Idle;
                // The filtered list is left as is
                self.form.reset();
            }
            Completion::RecordSubmitted(Err(e)) => {
                log::error!("Cannot save record: {e:#}");
                self.submit = SubmitState::Idle;
                self.alerts.push_back(Alert::RecordSubmitFailure);
            }
        }
    }
}
