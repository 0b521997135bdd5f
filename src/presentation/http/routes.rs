//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers;
use crate::presentation::middleware::{
    auth_middleware, create_security_headers_layer, optional_auth_middleware, track_metrics,
};
use crate::startup::AppState;

/// Room for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let uploads = &state.settings.uploads;
    let upload_route = format!("/{}", uploads.public_path.trim_matches('/'));
    let serve_uploads = ServeDir::new(&uploads.dir);

    Router::new()
        .nest("/api", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(handlers::health::metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        // Uploaded images
        .nest_service(&upload_route, serve_uploads)
        .layer(create_security_headers_layer(state.settings.is_production()))
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/info", get(handlers::health::info))
        .route("/plan-statuses", get(handlers::lookup::get_plan_statuses))
        .route("/trip-types", get(handlers::lookup::get_trip_types))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/user", user_routes(state.clone()))
        .nest("/plans", plan_routes(state.clone()))
        .nest("/places", place_routes(state.clone()))
        .nest("/files", file_routes(state))
}

/// Authentication routes (public except password change)
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/change-password", put(handlers::auth::change_password))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh_token))
        .route("/logout", post(handlers::auth::logout))
        .merge(protected)
}

/// User routes (protected)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::user::get_current_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Plan routes and their owner-only sub-resources
fn plan_routes(state: AppState) -> Router<AppState> {
    // Anonymous callers see public plans only
    let public = Router::new()
        .route("/public", get(handlers::plan::get_public_plans))
        .route("/user/{user_id}", get(handlers::plan::get_user_plans))
        .route("/{plan_id}", get(handlers::plan::get_plan))
        .route("/{plan_id}/owner/{user_id}", get(handlers::plan::check_owner))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    let protected = Router::new()
        .route("/", post(handlers::plan::create_plan))
        .route("/me", get(handlers::plan::get_my_plans))
        .route("/create-empty", post(handlers::plan::create_empty_plan))
        .route(
            "/{plan_id}",
            put(handlers::plan::update_plan).delete(handlers::plan::delete_plan),
        )
        .route("/{plan_id}/members", get(handlers::plan::get_members))
        .nest("/{plan_id}/places", plan_place_routes())
        .nest("/{plan_id}/basic-info", basic_info_routes())
        .nest("/{plan_id}/bookings", booking_routes())
        .nest("/{plan_id}/checklist", checklist_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

fn plan_place_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::plan_place::list_plan_places).post(handlers::plan_place::create_plan_place),
        )
        .route("/tree", get(handlers::plan_place::get_plan_place_tree))
        .route(
            "/{id}",
            get(handlers::plan_place::get_plan_place)
                .put(handlers::plan_place::update_plan_place)
                .delete(handlers::plan_place::delete_plan_place),
        )
}

fn basic_info_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::basic_info::get_basic_info).put(handlers::basic_info::update_basic_info),
    )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/{id}",
            get(handlers::booking::get_booking)
                .put(handlers::booking::update_booking)
                .delete(handlers::booking::delete_booking),
        )
}

fn checklist_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::checklist::list_items).post(handlers::checklist::create_item),
        )
        .route(
            "/{id}",
            put(handlers::checklist::update_item).delete(handlers::checklist::delete_item),
        )
}

/// Place catalogue (protected)
fn place_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::place::list_places).post(handlers::place::create_place),
        )
        .route("/google/{google_place_id}", get(handlers::place::get_place_by_google_id))
        .route(
            "/{place_id}",
            get(handlers::place::get_place)
                .put(handlers::place::update_place)
                .delete(handlers::place::delete_place),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Image uploads (protected)
fn file_routes(state: AppState) -> Router<AppState> {
    let body_limit = usize::try_from(state.settings.uploads.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/upload", post(handlers::file::upload_file))
        .route("/delete/{file_name}", delete(handlers::file::delete_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
