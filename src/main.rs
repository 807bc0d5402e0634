use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use visa_ai::config::AppConfig;
use visa_ai::error::AppError;
use visa_ai::telemetry;
use visa_ai::workflows::advisory::{
    advisory_router, AdvisoryPolicy, AdvisoryService, ApplicantProfile, PathwayRecommendation,
    VisaCatalog,
};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Immigration Pathway Advisor",
    about = "Advise visa pathway eligibility and application package readiness",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess an applicant profile from the command line
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Path to an applicant profile JSON file
    #[arg(long)]
    profile: PathBuf,
    /// Assess a single category instead of the full catalog
    #[arg(long)]
    category: Option<String>,
    /// Reference date for passport-window arithmetic (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Emit the full evaluation as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assess(args) => run_assess(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn load_catalog(config: &AppConfig) -> Result<VisaCatalog, AppError> {
    match &config.catalog.path {
        Some(path) => Ok(VisaCatalog::from_json_file(path)?),
        None => Ok(VisaCatalog::south_africa()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config)?;
    info!(categories = catalog.len(), "visa catalog loaded");

    let service = Arc::new(AdvisoryService::new(
        Arc::new(catalog),
        AdvisoryPolicy::default(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(advisory_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "immigration pathway advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        profile,
        category,
        today,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config)?;
    let service = AdvisoryService::new(Arc::new(catalog), AdvisoryPolicy::default());

    let raw = std::fs::read_to_string(&profile)?;
    let profile: ApplicantProfile = serde_json::from_str(&raw)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    if let Some(category_id) = category {
        let evaluation = service.evaluate_category_at(&profile, &category_id, today)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        } else {
            println!("Category: {category_id}");
            println!(
                "Eligible: {} (score {}%)",
                evaluation.eligible, evaluation.eligibility_score
            );
            println!("{}", evaluation.guidance);
        }
        return Ok(());
    }

    let recommendation = service.recommend_pathway_at(&profile, today);
    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        render_recommendation(&recommendation, today);
    }

    Ok(())
}

fn render_recommendation(recommendation: &PathwayRecommendation, today: NaiveDate) {
    println!("Immigration pathway assessment (evaluated {today})");
    println!(
        "Categories evaluated: {}",
        recommendation.evaluation.total_categories_evaluated
    );

    match &recommendation.recommended {
        Some(recommended) => {
            println!(
                "\nRecommended pathway: {} ({}), score {}%",
                recommended.name,
                recommended.legal_reference,
                recommended.evaluation.eligibility_score
            );
            println!("{}", recommended.evaluation.guidance);
        }
        None => {
            if let Some(message) = &recommendation.message {
                println!("\n{message}");
            }
        }
    }

    if !recommendation.alternative_options.is_empty() {
        println!("\nAlternative options");
        for option in &recommendation.alternative_options {
            println!(
                "- {} [{}]: score {}%, {} open risk flag(s)",
                option.name,
                option.group.label(),
                option.evaluation.eligibility_score,
                option.evaluation.risk_flags.len()
            );
        }
    }

    println!("\nHighest-scoring categories not currently met");
    for option in recommendation.evaluation.ineligible.iter().take(3) {
        println!(
            "- {}: score {}%, {} open risk flag(s)",
            option.name,
            option.evaluation.eligibility_score,
            option.evaluation.risk_flags.len()
        );
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
