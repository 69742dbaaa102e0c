use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::{net::IpAddr, sync::Arc};
use tera::Tera;
use tower_http::trace::TraceLayer;
use weather_core::{Dashboard, Location, Page, PageRequest, Suggestions, WeatherCard};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html.tera");
const MACROS_TEMPLATE: &str = include_str!("../templates/macros.html.tera");

#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Dashboard>,
    templates: Arc<Tera>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Result<Self> {
        Ok(Self { dashboard: Arc::new(dashboard), templates: Arc::new(templates()?) })
    }
}

fn templates() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![("macros.html", MACROS_TEMPLATE), ("index.html", INDEX_TEMPLATE)])
        .context("Failed to load dashboard template")?;
    Ok(tera)
}

pub fn render_page(tera: &Tera, page: &Page) -> Result<String> {
    let ctx = tera::Context::from_serialize(page).context("Failed to build template context")?;
    tera.render("index.html", &ctx).context("Failed to render dashboard")
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        .route("/api/page", get(page_json))
        .route("/api/suggestions", get(suggestions))
        .route("/api/weather", get(weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(dashboard: Dashboard, bind: IpAddr, port: u16) -> Result<()> {
    let preset_count = dashboard.presets().len();
    let app = router(AppState::new(dashboard)?);

    let listener = tokio::net::TcpListener::bind((bind, port))
        .await
        .with_context(|| format!("Failed to bind {bind}:{port}"))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    tracing::info!(presets = preset_count, "Dashboard running at http://{}", addr);
    println!("Dashboard running at http://{addr}");

    axum::serve(listener, app).await.context("Web server stopped unexpectedly")
}

async fn index(State(state): State<AppState>, Query(request): Query<PageRequest>) -> Response {
    let page = state.dashboard.render(&request).await;

    match render_page(&state.templates, &page) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!("{:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn page_json(
    State(state): State<AppState>,
    Query(request): Query<PageRequest>,
) -> Json<Page> {
    Json(state.dashboard.render(&request).await)
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    #[serde(default)]
    q: String,
}

async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<Suggestions> {
    Json(state.dashboard.suggestions(&query.q).await)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    lat: f64,
    lon: f64,
    name: Option<String>,
}

async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherCard>, (StatusCode, Json<serde_json::Value>)> {
    let name = query.name.unwrap_or_else(|| format!("{:.4}, {:.4}", query.lat, query.lon));

    state
        .dashboard
        .card(Location::new(name, query.lat, query.lon))
        .await
        .map(Json)
        .map_err(|err| {
            (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "error": err.weather_message() })))
        })
}
