//! Travel Gateway - an Actix Web gateway for event, hotel and flight APIs
//!
//! The gateway proxies an event discovery API, keeps saved events in a
//! local DuckDB database, searches flights, and searches hotel
//! availability through an API whose request-signature format is not
//! known up front. Hotel requests are resolved adaptively: the known
//! signature formats are tried in a fixed order, advancing only when the
//! hotel API answers 401.
//!
//! ## Architecture
//!
//! - `models/` - Request, response and diagnostic data structures
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request IDs, request logging and metrics
//! - `services/` - Signature strategies, resolver, upstream clients, storage
//! - `utils/` - Validation, redaction and request helpers
//! - `config/` - Configuration structures and environment loading
//!
//! ## Quick Start
//!
//! ```no_run
//! use travel_gateway::{AppState, ServerConfig, create_app};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let server = ServerConfig::from_env();
//!     let state = AppState::from_env(&server).map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind((server.host.as_str(), server.port))?
//!         .run()
//!         .await
//! }
//! ```

pub mod build_info;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::{
    HotelbedsConfig, LogFormat, MetricsConfig, SerpApiConfig, ServerConfig, TicketmasterConfig,
    TimestampUnit,
};
pub use handlers::{create_app, create_openapi_spec};
pub use logging::init_logging;
pub use middleware::{MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    AttemptKind, AttemptRecord, ErrorResponse, HealthResponse, HotelSearchCriteria,
    HotelSearchQuery, HotelSearchResponse, NewEvent, StoredEvent, VersionResponse,
};
pub use services::{
    AppMetrics, Credentials, EventDiscoveryService, EventStore, FlightSearchService,
    HotelSearchService, HotelTransport, ReqwestTransport, Resolution, ResolveError, RetryConfig,
    SignatureResolver, SignatureStrategy, TransportError, UpstreamClient, UpstreamClientConfig,
    UpstreamError, UpstreamReply,
};
pub use state::{AppState, StartupError};
