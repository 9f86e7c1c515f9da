use reqwest::blocking::Client;

use crate::app::games::Game;
use crate::config::Config;
use crate::svc::{Backend, RecordPayload};

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    fn with_client(client: Client, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_owned();

        log::info!("backend at {}", base_url);

        HttpBackend { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Backend for HttpBackend {
    fn fetch_games(&self) -> anyhow::Result<Vec<Game>> {
        let games = self
            .client
            .get(self.url("games"))
            .send()?
            .error_for_status()?
            .json::<Vec<Game>>()?;

        log::debug!("fetched {} games", games.len());
        Ok(games)
    }

    fn submit_record(&self, record: &RecordPayload) -> anyhow::Result<()> {
        self.client
            .post(self.url("records"))
            .json(record)
            .send()?
            .error_for_status()?;

        Ok(())
    }
}
