//! Shared application state assembled at startup.

use crate::{
    config::{HotelbedsConfig, MetricsConfig, SerpApiConfig, ServerConfig, TicketmasterConfig},
    services::{
        AppMetrics, EventDiscoveryService, EventStore, FlightSearchService, HotelSearchService,
        StoreError, UpstreamClient, UpstreamClientConfig,
    },
};
use actix_web::web;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to create metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to open event database: {0}")]
    Store(#[from] StoreError),
}

/// Services and configuration shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub hotels: web::Data<HotelSearchService>,
    pub events: web::Data<EventDiscoveryService>,
    pub flights: web::Data<FlightSearchService>,
    pub store: web::Data<EventStore>,
    pub metrics: web::Data<AppMetrics>,
    pub metrics_config: web::Data<MetricsConfig>,
}

impl AppState {
    pub fn new(
        hotels: HotelSearchService,
        events: EventDiscoveryService,
        flights: FlightSearchService,
        store: EventStore,
        metrics: AppMetrics,
        metrics_config: MetricsConfig,
    ) -> Self {
        Self {
            hotels: web::Data::new(hotels),
            events: web::Data::new(events),
            flights: web::Data::new(flights),
            store: web::Data::new(store),
            metrics: web::Data::new(metrics),
            metrics_config: web::Data::new(metrics_config),
        }
    }

    /// Build every service from environment configuration
    pub fn from_env(server: &ServerConfig) -> Result<Self, StartupError> {
        let hotelbeds = HotelbedsConfig::from_env();
        let metrics_config = MetricsConfig::from_env();
        let metrics = AppMetrics::new()?;

        if !hotelbeds.has_credentials() {
            warn!("HOTELBEDS_API_KEY/HOTELBEDS_API_SECRET not set; hotel search will fail");
        }
        info!(
            url = %hotelbeds.url,
            forced_format = ?hotelbeds.forced_signature,
            timestamp_unit = ?hotelbeds.timestamp_unit,
            "Hotel search configured"
        );

        let upstream = UpstreamClient::new(UpstreamClientConfig::from_env(), Some(metrics.clone()))?;

        Ok(Self::new(
            HotelSearchService::from_config(&hotelbeds)?,
            EventDiscoveryService::new(&TicketmasterConfig::from_env(), upstream.clone()),
            FlightSearchService::new(&SerpApiConfig::from_env(), upstream),
            EventStore::open(&server.database_path)?,
            metrics,
            metrics_config,
        ))
    }
}
