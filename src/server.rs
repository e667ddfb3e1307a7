//! HTTP front end: every method and path goes to [`Router::dispatch`].

use crate::{
    router::{ApiResponse, Operations, Router},
    Result,
};
use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, Json(self.body)).into_response()
    }
}

/// Axum app with a single fallback handler.
pub fn app<O: Operations + 'static>(router: Arc<Router<O>>) -> axum::Router {
    axum::Router::new()
        .fallback(handle::<O>)
        .with_state(router)
}

async fn handle<O: Operations + 'static>(
    State(router): State<Arc<Router<O>>>,
    uri: Uri,
    body: String,
) -> ApiResponse {
    let body = (!body.trim().is_empty()).then_some(body.as_str());
    router.dispatch(uri.path(), body).await
}

/// Serve until the listener fails.
pub async fn serve<O: Operations + 'static>(listener: TcpListener, router: Router<O>) -> Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app(Arc::new(router))).await?;
    Ok(())
}
