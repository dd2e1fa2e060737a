use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use rink_api::TeamQuery;
use rink_api::badge::BadgeCache;
use rink_api::client::{ApiError, RinkApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the HTTP client and the badge cache; the only task that talks to
/// the network.
pub struct NetworkWorker {
    client: RinkApi,
    team: TeamQuery,
    badges: BadgeCache,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: RinkApi,
        team: TeamQuery,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            team,
            badges: BadgeCache::default(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadReport => self.handle_load_report().await,
                NetworkRequest::RefreshReport => self.handle_refresh_report().await,
                NetworkRequest::ClearBadgeCache => self.handle_clear_badge_cache().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_report(&mut self) -> Result<NetworkResponse, ApiError> {
        info!("loading report for {}", self.team.tag());
        self.fetch_snapshot().await
    }

    async fn handle_refresh_report(&mut self) -> Result<NetworkResponse, ApiError> {
        debug!("refreshing report ({} badges cached)", self.badges.len());
        self.fetch_snapshot().await
    }

    async fn handle_clear_badge_cache(&mut self) -> Result<NetworkResponse, ApiError> {
        info!("clearing {} cached badges", self.badges.len());
        self.badges.clear();
        self.fetch_snapshot().await
    }

    async fn fetch_snapshot(&mut self) -> Result<NetworkResponse, ApiError> {
        let snapshot = self
            .client
            .fetch_team_snapshot(&self.team, &mut self.badges)
            .await?;
        debug!(
            "{} tracked fixtures out of {} parsed",
            snapshot.tracked.len(),
            snapshot.stats.records
        );
        Ok(NetworkResponse::ReportLoaded { snapshot })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
