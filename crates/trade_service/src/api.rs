//! REST handlers (grounded on `trade/api/api.go`'s `apiService`).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use match_core::{CompletionSink, MatcherCoordinator, Order, OrderType, Transaction};
use serde::Deserialize;
use tracing::{debug, error};

/// Shared state handed to every route (`apiService`'s fields).
#[derive(Clone)]
pub struct ApiState {
    pub matcher: MatcherCoordinator,
    pub completions: CompletionSink,
}

/// Wire shape of `POST /trade`'s body; the id and submission time are
/// assigned by this adapter, not supplied by the caller.
#[derive(Deserialize)]
struct PlaceOrderRequest {
    transaction: u8,
    order_type: u8,
    quantity: i64,
    price: i64,
}

/// `POST /trade`. A present but non-JSON Content-Type is rejected with
/// 415; a Content-Type-less request is accepted (matches the original's
/// `if req.Header.Get("Content-Type") != ""` guard).
pub async fn place_order(State(state): State<ApiState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let is_json = content_type
            .to_str()
            .is_ok_and(|value| value.starts_with("application/json"));
        if !is_json {
            error!("unsupported content-type");
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type header is not application/json",
            )
                .into_response();
        }
    }

    let request: PlaceOrderRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(%err, "unable to decode order");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };
    let (Ok(transaction), Ok(order_type)) = (
        Transaction::try_from(request.transaction),
        OrderType::try_from(request.order_type),
    ) else {
        error!("unable to decode order");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    };

    let order = Order::new(transaction, order_type, request.quantity, request.price);
    let receipt = format!(
        "Received Order [{}, {}, {}, {}], Id = {}\n",
        order.transaction, order.order_type, order.placed_quantity, order.price, order.id,
    );
    debug!(details = %receipt, "order received");

    state.matcher.submit(order).await;
    receipt.into_response()
}

/// `GET /orders`: the completion sink's listing as plain text, one
/// order per line per spec §4.7's format.
pub async fn get_orders(State(state): State<ApiState>) -> Response {
    debug!("received get orders request");
    let mut body = String::new();
    for line in state.completions.listing_lines().await {
        body.push_str(&line);
        body.push('\n');
    }
    body.into_response()
}
