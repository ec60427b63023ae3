#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::DashboardConfig;
use crate::downloader;
use crate::error::DashboardError;
use crate::graph::{GraphOptions, render_stacked_bar};
use crate::section::{Dashboard, SectionView};

pub struct AppState {
    dashboard: Dashboard,
    config: DashboardConfig,
}

#[derive(Deserialize)]
struct ChoicesQuery {
    first: String,
}

#[derive(Deserialize)]
struct SelectionQuery {
    first: String,
    second: String,
}

#[derive(Serialize)]
struct SectionInfo {
    id: &'static str,
    heading: &'static str,
    first_prompt: &'static str,
    second_prompt: &'static str,
    choices: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

/// Failure of one request, reported in place of the chart it was for.
struct ApiError(StatusCode, String);

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        let status = match &e {
            DashboardError::Configuration { .. } => StatusCode::BAD_REQUEST,
            DashboardError::SourceNotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::LayoutMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, e.to_string())
    }
}

impl From<Box<dyn std::error::Error>> for ApiError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("request failed ({}): {}", self.0, self.1);
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.1,
        };
        (self.0, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Builds the router over a ready dashboard.
pub fn router(dashboard: Dashboard, config: DashboardConfig) -> Router {
    let app_state = Arc::new(AppState { dashboard, config });

    Router::new()
        .route("/", get(serve_landing))
        .route("/api/sections", get(list_sections))
        .route("/api/sections/:id/choices", get(get_choices))
        .route("/api/sections/:id/series", get(get_series))
        .route("/api/sections/:id/chart.png", get(get_chart))
        .route("/api/sections/:id/export.csv", get(export_csv))
        .route("/api/sections/:id/export.xlsx", get(export_xlsx))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]))
        .with_state(app_state)
}

// Binds a socket and serves forever; exercised through `router` instead.
#[cfg(not(tarpaulin_include))]
pub async fn run(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::new(&config.data_dir);
    let addr = config.bind_addr.clone();
    let app = router(dashboard, config);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_landing() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

async fn list_sections(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SectionInfo>>> {
    let dashboard = &state.dashboard;
    let mut sections = Vec::new();
    for section in dashboard.sections() {
        sections.push(SectionInfo {
            id: section.id,
            heading: section.heading,
            first_prompt: section.first_prompt,
            second_prompt: section.second_prompt,
            choices: dashboard.first_choices(section.id)?,
        });
    }
    Ok(Json(sections))
}

async fn get_choices(
    Path(id): Path<String>,
    Query(params): Query<ChoicesQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.dashboard.second_choices(&id, &params.first)?))
}

fn render(state: &AppState, id: &str, params: &SelectionQuery) -> ApiResult<SectionView> {
    Ok(state.dashboard.render(id, &params.first, &params.second)?)
}

async fn get_series(
    Path(id): Path<String>,
    Query(params): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SectionView>> {
    Ok(Json(render(&state, &id, &params)?))
}

async fn get_chart(
    Path(id): Path<String>,
    Query(params): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let view = render(&state, &id, &params)?;
    let options = GraphOptions {
        title: view.caption.clone(),
        width: state.config.chart_width,
        height: state.config.chart_height,
        ..GraphOptions::default()
    };
    let png = render_stacked_bar(&view.series, &options, state.dashboard.colors())?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

async fn export_csv(
    Path(id): Path<String>,
    Query(params): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let view = render(&state, &id, &params)?;
    let csv = downloader::to_csv(&view.series);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&view, "csv")),
        ],
        csv,
    )
        .into_response())
}

async fn export_xlsx(
    Path(id): Path<String>,
    Query(params): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let view = render(&state, &id, &params)?;
    let xlsx = downloader::to_xlsx(&view.series)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, attachment(&view, "xlsx")),
        ],
        xlsx,
    )
        .into_response())
}

fn attachment(view: &SectionView, extension: &str) -> String {
    let stem: String = view
        .source
        .sheet
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("attachment; filename=\"{}_{}.{}\"", view.section, stem, extension)
}
