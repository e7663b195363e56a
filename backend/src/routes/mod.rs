//! Route definitions for the FranchiseConnect platform

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public + profile)
        .nest("/auth", auth_routes())
        // Protected routes - business discovery
        .nest("/businesses", business_routes())
        // Protected routes - application lifecycle
        .nest("/applications", application_routes())
        // Protected routes - financial reporting
        .nest("/financials", financial_routes())
        // Protected routes - direct messaging
        .nest("/messages", message_routes())
        // Protected routes - notifications
        .nest("/notifications", notification_routes())
        // Protected routes - platform administration
        .nest("/admin", admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/register-business", post(handlers::register_business))
        .route("/login", post(handlers::login))
        .merge(protected_auth_routes())
}

/// Authenticated account routes
fn protected_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::get_profile))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Business discovery routes (protected)
fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_businesses))
        .route("/:business_id", get(handlers::get_business))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Application lifecycle routes (protected)
fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submit_application))
        .route("/:application_id", get(handlers::get_application))
        .route(
            "/:application_id/status",
            put(handlers::update_application_status),
        )
        .route(
            "/:application_id/franchise",
            delete(handlers::remove_franchise),
        )
        .route(
            "/business/:business_id/franchisees",
            get(handlers::get_business_franchisees),
        )
        .route(
            "/investor/:investor_id/franchises",
            get(handlers::get_investor_franchises),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Financial reporting routes (protected)
fn financial_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_financial_entries).post(handlers::submit_financial_entry),
        )
        .route("/summary", get(handlers::get_financial_summary))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Direct messaging routes (protected)
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::send_message))
        .route("/partners", get(handlers::get_chat_partners))
        .route("/:partner_id", get(handlers::get_conversation))
        .route("/:partner_id/read", post(handlers::mark_conversation_read))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Notification routes (protected)
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_notifications))
        .route("/unread-count", get(handlers::get_unread_count))
        .route(
            "/:notification_id/read-status",
            put(handlers::update_notification_read_status),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Platform administration routes (protected, admin-only in handlers)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard_metrics))
        .route("/users", get(handlers::list_all_users))
        .route("/businesses", get(handlers::list_businesses_for_review))
        .route(
            "/businesses/:business_id/status",
            put(handlers::update_business_status),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
