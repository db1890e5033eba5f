use axum::{
    Router,
    handler::Handler,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::{
    http::handlers::{
        create_module_handler, create_rating_handler, delete_module_handler,
        export_report_handler, get_active_modules_handler, get_all_modules_handler,
        get_ratings_handler, get_report_handler, get_reports_handler, health_handler,
        login_handler, me_handler, register_handler, set_module_active_handler,
        update_module_handler,
    },
    middleware::{create_auth_rate_limiter, create_submission_rate_limiter, rate_limit_middleware},
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    let auth_rate_limiter = create_auth_rate_limiter();
    let submission_rate_limiter = create_submission_rate_limiter();

    let auth_routes = Router::new()
        .route("/login", post(login_handler))
        .route("/register", post(register_handler))
        .route_layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(auth_rate_limiter.clone(), req, next)
        }))
        .route("/me", get(me_handler));

    let module_routes = Router::new()
        .route("/", get(get_active_modules_handler).post(create_module_handler))
        .route("/all", get(get_all_modules_handler))
        .route(
            "/{id}",
            patch(update_module_handler).delete(delete_module_handler),
        )
        .route("/{id}/active", patch(set_module_active_handler));

    // Only submissions are throttled; listing stays unrestricted
    let rating_routes = Router::new().route(
        "/",
        get(get_ratings_handler).post(create_rating_handler.layer(axum_middleware::from_fn(
            move |req, next| rate_limit_middleware(submission_rate_limiter.clone(), req, next),
        ))),
    );

    let report_routes = Router::new()
        .route("/", get(get_reports_handler))
        .route("/{id}", get(get_report_handler))
        .route("/{id}/export", get(export_report_handler));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/modules", module_routes)
        .nest("/ratings", rating_routes)
        .nest("/reports", report_routes);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}
