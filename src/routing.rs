//! Application router configuration.

use axum::{Router, middleware, response::Redirect, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{get_account_page, get_account_summary},
    endpoints,
    error_pages::get_404_not_found,
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.static_dir);

    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ACCOUNT_VIEW, get(get_account_page))
        .route(endpoints::ACCOUNT_SUMMARY_API, get(get_account_summary))
        .fallback(get_404_not_found)
        // Everything except static files goes through the request logger.
        .layer(middleware::from_fn(logging_middleware))
        .nest_service(endpoints::STATIC, static_dir)
        .with_state(state)
}

/// The root path '/' redirects to the account page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::ACCOUNT_VIEW)
}
