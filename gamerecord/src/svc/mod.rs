pub use http_backend::HttpBackend;
pub use worker::{Completion, Request, RequestWorker};

use crate::app::games::Game;

mod http_backend;
mod worker;

/// Body of `POST /records`.
#[derive(Debug, serde::Serialize, serde::Deserialize, Default, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub name: String,
    pub age: String,
    pub game_id: String,
}

pub trait Backend {
    fn fetch_games(&self) -> anyhow::Result<Vec<Game>>;

    fn submit_record(&self, record: &RecordPayload) -> anyhow::Result<()>;
}
