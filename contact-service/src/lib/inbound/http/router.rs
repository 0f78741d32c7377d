use std::sync::Arc;
use std::time::Duration;

use auth::AuthGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::login::login;
use super::handlers::account::logout::logout;
use super::handlers::account::me::me;
use super::handlers::account::register::register;
use super::handlers::contacts::create_contact::create_contact;
use super::handlers::contacts::delete_contact::delete_contact;
use super::handlers::contacts::get_contact::get_contact;
use super::handlers::contacts::list_contacts::list_contacts;
use super::handlers::contacts::update_contact::update_contact;
use super::handlers::health::health;
use super::middleware::authenticate as auth_middleware;
use crate::domain::contact::ports::ContactServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub contact_service: Arc<dyn ContactServicePort>,
    pub gate: AuthGate,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    contact_service: Arc<dyn ContactServicePort>,
    gate: AuthGate,
) -> Router {
    let state = AppState {
        user_service,
        contact_service,
        gate,
    };

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route(
            "/api/contacts/:contact_id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are not recorded: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
