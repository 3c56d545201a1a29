//! Web surface: a single page in front of the forecast pipeline
//!
//! The page has one text input, one trigger button, one output container,
//! and one chart image that stays hidden until the first successful render.
//! The JSON endpoint runs the pipeline server-side; the chart artifact is
//! served from its configured path.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::api::WeatherApiClient;
use crate::chart::{self, ChartHandle};
use crate::config::AppConfig;
use crate::pipeline;

/// Shared state behind the route handlers
pub struct AppState {
    client: WeatherApiClient,
    config: AppConfig,
    /// The one live chart artifact. Holding this lock across a pipeline run
    /// serializes overlapping triggers instead of letting them interleave.
    chart: Mutex<Option<ChartHandle>>,
}

impl AppState {
    /// Create the shared state for the route handlers
    #[must_use]
    pub fn new(client: WeatherApiClient, config: AppConfig) -> Self {
        Self {
            client,
            config,
            chart: Mutex::new(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastParams {
    city: String,
}

/// Response body of the forecast endpoint
#[derive(Debug, Serialize)]
pub struct ApiForecast {
    /// Whether the pipeline produced a report
    pub ok: bool,
    /// Rendered markup fragment on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// User-facing status message otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/forecast", get(get_forecast))
        .route("/chart.svg", get(get_chart))
        .layer(cors)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastParams>,
) -> Json<ApiForecast> {
    let mut slot = state.chart.lock().await;

    match pipeline::fetch_city_forecast(&state.client, &params.city).await {
        Ok(report) => {
            let previous = slot.take();
            match chart::draw_temperature_chart(previous, report.days(), &state.config.chart) {
                Ok(handle) => {
                    *slot = Some(handle);
                    Json(ApiForecast {
                        ok: true,
                        html: Some(report.to_html()),
                        message: None,
                    })
                }
                Err(e) => {
                    error!("Chart rendering failed: {e}");
                    Json(ApiForecast {
                        ok: false,
                        html: None,
                        message: Some(e.user_message()),
                    })
                }
            }
        }
        Err(e) => Json(ApiForecast {
            ok: false,
            html: None,
            message: Some(e.user_message()),
        }),
    }
}

async fn get_chart(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let slot = state.chart.lock().await;
    let Some(handle) = slot.as_ref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(handle.path()).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/svg+xml")], bytes).into_response(),
        Err(e) => {
            error!("Failed to read chart artifact: {e}");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Bind the configured address and serve the web surface
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let client = WeatherApiClient::new(config.endpoints.clone())?;
    let state = Arc::new(AppState::new(client, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("citycast running at http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
