//! The dispatch endpoint: one inbound user action in, everything the engine
//! rendered for it out.

use axum::extract::State;
use axum::{routing::post, Json, Router};

use funnel_engine::InboundAction;

use crate::error::AppResult;
use crate::reply::{DispatchReply, ReplyBuffer};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/dispatch -- run one action through the engine.
async fn dispatch(
    State(state): State<AppState>,
    Json(action): Json<InboundAction>,
) -> AppResult<Json<DataResponse<DispatchReply>>> {
    let buffer = ReplyBuffer::new();
    state.engine.handle(&buffer, action).await?;
    Ok(Json(DataResponse { data: buffer.into_reply() }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dispatch", post(dispatch))
}
