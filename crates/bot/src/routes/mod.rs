pub mod dispatch;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dispatch    POST    one inbound user action in, rendered replies out
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(dispatch::router())
}
