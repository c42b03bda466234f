use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum, error::ErrorKind};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::core::{Goal, Recommendation, RiskTier, compute_allocation, resolve_labels};
use crate::report::{Card, Palette, ProfileSummary, Theme, recommendation_cards, render_text};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 100;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RecommendPayload {
    age: Option<u32>,
    #[serde(alias = "income", alias = "monthly_income")]
    monthly_income: Option<f64>,
    #[serde(alias = "riskAppetite", alias = "risk_appetite")]
    risk: Option<String>,
    #[serde(alias = "investmentGoal", alias = "investment_goal")]
    goal: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeQuery {
    theme: Option<Theme>,
}

#[derive(Parser, Debug)]
#[command(
    name = "investsmart",
    about = "Rule-based portfolio allocation across equity, debt, gold and cash"
)]
struct Cli {
    #[arg(long, default_value_t = 25, help = "Investor age in years (18-100)")]
    age: u32,
    #[arg(long, default_value_t = 50_000.0, help = "Monthly income in rupees")]
    monthly_income: f64,
    #[arg(
        long,
        default_value = "Low",
        help = "Risk appetite: Low, Moderate or High"
    )]
    risk: String,
    #[arg(
        long,
        default_value = "Short-term",
        help = "Investment goal: Short-term, Long-term, Retirement or Wealth Creation"
    )]
    goal: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    age: u32,
    monthly_income: f64,
    risk: RiskTier,
    goal: Option<Goal>,
    goal_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendResponse {
    #[serde(flatten)]
    recommendation: Recommendation,
    cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_profile(cli: &Cli) -> Result<Profile, String> {
    if !(MIN_AGE..=MAX_AGE).contains(&cli.age) {
        return Err(format!("--age must be between {MIN_AGE} and {MAX_AGE}"));
    }

    if !cli.monthly_income.is_finite() || cli.monthly_income <= 0.0 {
        return Err("--monthly-income must be > 0".to_string());
    }

    let (risk, goal) = resolve_labels(&cli.risk, &cli.goal).map_err(|e| e.to_string())?;

    Ok(Profile {
        age: cli.age,
        monthly_income: cli.monthly_income,
        risk,
        goal,
        goal_label: cli.goal.clone(),
    })
}

fn build_recommend_response(profile: &Profile) -> RecommendResponse {
    let recommendation = compute_allocation(
        profile.age,
        profile.monthly_income,
        profile.risk,
        profile.goal,
    );
    let cards = recommendation_cards(
        ProfileSummary {
            age: profile.age,
            risk: profile.risk.label(),
            goal: &profile.goal_label,
        },
        &recommendation,
    );

    RecommendResponse {
        recommendation,
        cards,
    }
}

// Returns what should be printed on stdout; `--help` and `--version` count as output.
pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(e.to_string());
        }
        Err(e) => return Err(e.to_string()),
    };
    run_cli_command(&cli)
}

fn run_cli_command(cli: &Cli) -> Result<String, String> {
    let profile = build_profile(cli)?;
    let response = build_recommend_response(&profile);
    match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response.recommendation)
            .map_err(|e| format!("Failed to encode recommendation: {e}")),
        OutputFormat::Text => Ok(render_text(&response.cards)),
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "InvestSmart HTTP API listening");
    info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, build_router()).await
}

fn build_router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/theme", get(theme_handler))
        .route(
            "/api/recommend",
            get(recommend_get_handler).post(recommend_post_handler),
        )
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn theme_handler(query: Result<Query<ThemeQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let palette: &Palette = query.theme.unwrap_or_default().palette();
    json_response(StatusCode::OK, palette)
}

async fn recommend_get_handler(
    payload: Result<Query<RecommendPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => recommend_handler_impl(payload).await,
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn recommend_post_handler(payload: Result<Json<RecommendPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => recommend_handler_impl(payload).await,
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn recommend_handler_impl(payload: RecommendPayload) -> Response {
    let profile = match profile_from_payload(payload) {
        Ok(profile) => profile,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let response = build_recommend_response(&profile);
    info!(
        age = profile.age,
        risk = %profile.risk,
        goal = %profile.goal_label,
        suggested_investment = response.recommendation.suggested_investment,
        "served recommendation"
    );
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn profile_from_payload(payload: RecommendPayload) -> Result<Profile, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.age {
        cli.age = v;
    }
    if let Some(v) = payload.monthly_income {
        cli.monthly_income = v;
    }
    if let Some(v) = payload.risk {
        cli.risk = v;
    }
    if let Some(v) = payload.goal {
        cli.goal = v;
    }

    build_profile(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        age: 25,
        monthly_income: 50_000.0,
        risk: RiskTier::Low.label().to_string(),
        goal: Goal::ShortTerm.label().to_string(),
        format: OutputFormat::Json,
    }
}
