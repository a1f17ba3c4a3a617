//! Trade service bootstrap: wires the matcher, completion sink, and the
//! REST surface, then serves (grounded on `trade/main.go` + `trade/
//! service/service.go`'s `Start`).

use axum::routing::{get, post};
use axum::Router;
use match_core::{CompletionSink, MatcherConfig, MatcherCoordinator};
use trade_service::api::{get_orders, place_order, ApiState};
use tracing::info;

struct Args {
    service_endpoint: String,
    order_timeout: i64,
}

/// Manual `--flag=value` parsing, matching the workspace's no-`clap`
/// convention.
fn parse_args() -> Args {
    let mut service_endpoint = "localhost:8000".to_string();
    let mut order_timeout = 10i64;
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--service-endpoint=") {
            service_endpoint = value.to_string();
        } else if let Some(value) = arg.strip_prefix("--order-timeout=") {
            match value.parse() {
                Ok(parsed) => order_timeout = parsed,
                Err(_) => eprintln!("invalid --order-timeout value {value:?}, keeping default"),
            }
        }
    }
    Args {
        service_endpoint,
        order_timeout,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args();
    info!(endpoint = %args.service_endpoint, order_timeout = args.order_timeout, "service.Start()");

    let completions = CompletionSink::new();
    let config = MatcherConfig::default().with_order_timeout_seconds(args.order_timeout);
    let (matcher, _matcher_handle) = MatcherCoordinator::spawn(config, completions.clone());

    let state = ApiState {
        matcher,
        completions,
    };
    let app = Router::new()
        .route("/trade", post(place_order))
        .route("/orders", get(get_orders))
        .with_state(state);

    info!(endpoint = %args.service_endpoint, "starting rest api service");
    let listener = tokio::net::TcpListener::bind(&args.service_endpoint)
        .await
        .expect("bind service endpoint");
    axum::serve(listener, app).await.expect("serve rest api service");
}
