//! API Handlers
//!
//! HTTP request handlers for each auction service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::auction::{
    AuctionRepository, AuctionStatus, AuctionStore, Clock, InMemoryAuctionStore, SystemClock,
    WatcherConfig,
};
use crate::error::{AuctionError, Result};
use crate::models::{
    AuctionListResponse, AuctionResponse, CreateAuctionRequest, HealthResponse,
    ListAuctionsQuery, StatsResponse,
};
use crate::tasks::{SweepExecutor, SweepStats};

/// Application state shared across all handlers.
///
/// The repository and the sweep executor share one store adapter; the
/// executor is the single sweeper for that store.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<AuctionRepository>,
    pub sweeper: Arc<SweepExecutor>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new AppState over the given store and clock.
    pub fn new(store: Arc<dyn AuctionStore>, clock: Arc<dyn Clock>, config: WatcherConfig) -> Self {
        let repository = AuctionRepository::new(store.clone(), clock.clone(), config);
        let sweeper = SweepExecutor::new(store, clock.clone(), Arc::new(SweepStats::new()));
        Self {
            repository: Arc::new(repository),
            sweeper: Arc::new(sweeper),
            clock,
        }
    }

    /// Creates a new AppState from configuration, backed by an in-memory store.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            Arc::new(InMemoryAuctionStore::new()),
            Arc::new(SystemClock),
            config.watcher,
        )
    }
}

/// Handler for POST /auctions
pub async fn create_auction_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateAuctionRequest>,
) -> Result<(StatusCode, Json<AuctionResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AuctionError::InvalidRequest(error_msg));
    }

    let created = state.repository.create_auction(req.into_new_auction()).await?;
    let now = state.clock.now_secs();

    Ok((StatusCode::CREATED, Json(AuctionResponse::new(created, now))))
}

/// Handler for GET /auctions/:id
pub async fn get_auction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuctionResponse>> {
    let auction = state.repository.find_auction(&id).await?;
    Ok(Json(AuctionResponse::new(auction, state.clock.now_secs())))
}

/// Handler for GET /auctions
pub async fn list_auctions_handler(
    State(state): State<AppState>,
    Query(query): Query<ListAuctionsQuery>,
) -> Result<Json<AuctionListResponse>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<AuctionStatus>)
        .transpose()
        .map_err(AuctionError::InvalidRequest)?;

    let auctions = state.repository.list_auctions(status).await?;
    Ok(Json(AuctionListResponse::new(auctions)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let config = state.repository.config();
    Json(StatsResponse {
        sweeps: state.sweeper.stats().snapshot(),
        auction_timeout_secs: config.lifetime_secs(),
        poll_interval_ms: config.poll_interval().as_millis() as u64,
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
