use async_trait::async_trait;
use eyre::Result;
use log::{debug, info};
use reqwest::Client as ReqwestClient;

use types::domain::{PlayerActionRequest, PlayerActionResponse};

use crate::config::Config;

pub const PLAYER_ACTION_PATH: &str = "/player_action";

/// Where a validated player action gets submitted.
#[async_trait]
pub trait ActionTransport: Send + Sync {
    async fn submit(&self, request: &PlayerActionRequest) -> Result<PlayerActionResponse>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub client: ReqwestClient,
    pub config: Config,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Posts the action as JSON and decodes the reply body whatever the status code.
    pub async fn player_action(
        &self,
        request: &PlayerActionRequest,
    ) -> Result<PlayerActionResponse> {
        let url = self.config.endpoint(PLAYER_ACTION_PATH);
        debug!("POST {} {:?}", url, request);
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body: PlayerActionResponse = response.json().await?;
        info!(
            "player action {} answered {} (success: {})",
            request.action, status, body.success
        );
        Ok(body)
    }
}

#[async_trait]
impl ActionTransport for Client {
    async fn submit(&self, request: &PlayerActionRequest) -> Result<PlayerActionResponse> {
        self.player_action(request).await
    }
}
