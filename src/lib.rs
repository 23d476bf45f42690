pub mod calendar;
pub mod dates;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod queries;
pub mod records;
pub mod selection;
pub mod settings;
pub mod transform;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use handlers::{
    get_calendar, get_class, get_events, get_occurrences, healthz_live, healthz_ready, root,
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dates::{Clock, SystemClock};
use crate::graphql::GraphqlClient;
use crate::openapi::ApiDoc;
use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub client: Arc<GraphqlClient>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            client: Arc::new(GraphqlClient::new(
                settings.graphql_endpoint.clone(),
                settings.occurrences_limit,
            )),
            clock: Arc::new(SystemClock),
            settings,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::new(settings);
    info!(
        endpoint = %state.settings.graphql_endpoint,
        timezone = %state.settings.display_timezone,
        "Using GraphQL backend"
    );

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Event Discovery API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/events", get(get_events))
        .route("/classes/{slug}", get(get_class))
        .route("/classes/{slug}/occurrences", get(get_occurrences))
        .route("/classes/{slug}/calendar", get(get_calendar))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(CorsLayer::permissive()).layer(trace_layer)
}
