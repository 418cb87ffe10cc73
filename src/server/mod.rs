//! HTTP surface: axum on tokio in front of the synchronous [`routes::route_request`] dispatcher.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::Result;

pub mod api;
pub mod routes;
pub mod static_files;

pub use api::ApiContext;
pub use routes::{route_request, HttpResponse};

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        if let Some(disposition) = self.content_disposition {
            match HeaderValue::from_str(&disposition) {
                Ok(value) => {
                    headers.insert(header::CONTENT_DISPOSITION, value);
                }
                Err(err) => tracing::warn!(%err, "dropping invalid content-disposition"),
            }
        }
        response
    }
}

/// Store calls block on file I/O, so each request runs on the blocking pool.
async fn dispatch(State(ctx): State<Arc<ApiContext>>, method: Method, uri: Uri, body: String) -> Response {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    let method = method.as_str().to_string();
    let joined = tokio::task::spawn_blocking(move || route_request(&ctx, &method, &path, &body)).await;
    match joined {
        Ok(response) => response.into_response(),
        Err(err) => {
            tracing::error!(%err, "request handler panicked");
            routes::error_response(500, "Internal Server Error", "Request handler failed").into_response()
        }
    }
}

pub fn build_router(ctx: ApiContext, frontend_dist: &Path) -> Router {
    let api = Router::new()
        .route("/api/*rest", any(dispatch))
        .with_state(Arc::new(ctx));

    let app = if static_files::frontend_available(frontend_dist) {
        api.fallback_service(static_files::spa_service(frontend_dist))
    } else {
        tracing::info!(dist = %frontend_dist.display(), "no front-end build, serving API console at /");
        api.route("/", get(static_files::console_page))
    };

    app.layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive())
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let app = build_router(ApiContext::from_config(config), &config.frontend_dist);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(bind = %config.bind, dataset = %config.dataset.display(), "herorank server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn run_server(config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config))
}
