use crate::server::api::{self, ApiContext, ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub content_disposition: Option<String>,
    pub body: String,
}

impl HttpResponse {
    fn json(status_code: u16, status_text: &'static str, body: String) -> Self {
        Self {
            status_code,
            status_text,
            content_type: "application/json",
            content_disposition: None,
            body,
        }
    }
}

/// Dispatch one API request. `path` may carry a query string.
pub fn route_request(ctx: &ApiContext, method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = route.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", ["api", "health"]) => respond(api::health_payload(ctx), 200, "OK"),
        ("GET", ["api", "heroes"]) => respond(api::heroes_payload(ctx), 200, "OK"),
        ("POST", ["api", "heroes"]) => respond(api::create_hero_payload(ctx, body), 201, "Created"),
        ("POST", ["api", "heroes", "bulk"]) => respond(api::bulk_update_payload(ctx, body), 200, "OK"),
        (method @ ("GET" | "PUT" | "DELETE"), ["api", "heroes", raw_id]) => {
            let id = match api::parse_hero_id(raw_id) {
                Ok(id) => id,
                Err(err) => return api_error_response(err),
            };
            let result = match method {
                "GET" => api::hero_payload(ctx, id),
                "PUT" => api::update_hero_payload(ctx, id, body),
                _ => api::delete_hero_payload(ctx, id),
            };
            respond(result, 200, "OK")
        }
        ("GET", ["api", "export"]) => {
            let mut response = respond(api::export_payload(ctx), 200, "OK");
            if response.status_code == 200 {
                response.content_disposition =
                    Some(format!("attachment; filename={}", api::EXPORT_FILENAME));
            }
            response
        }
        ("POST", ["api", "import"]) => respond(api::import_payload(ctx, body), 200, "OK"),
        ("GET", ["api", "stats"]) => respond(api::stats_payload(ctx), 200, "OK"),
        ("POST", ["api", "filter"]) => respond(api::filter_payload(ctx, body), 200, "OK"),
        ("GET", ["api", "rankings"]) => respond(api::rankings_payload(ctx, path), 200, "OK"),
        ("POST", ["api", "compare"]) => respond(api::compare_payload(ctx, body), 200, "OK"),
        ("POST", ["api", "battle"]) => respond(api::battle_payload(ctx, body), 200, "OK"),
        ("POST", ["api", "battle", "odds"]) => respond(api::battle_odds_payload(ctx, body), 200, "OK"),
        ("GET", ["api", "battles"]) => respond(api::battles_payload(ctx), 200, "OK"),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn respond(result: ApiResult, status_code: u16, status_text: &'static str) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::json(status_code, status_text, payload),
        Err(err) => api_error_response(err),
    }
}

fn api_error_response(err: ApiError) -> HttpResponse {
    match err {
        ApiError::BadRequest(msg) => error_response(400, "Bad Request", &msg),
        ApiError::NotFound(msg) => error_response(404, "Not Found", &msg),
        ApiError::Internal(msg) => error_response(500, "Internal Server Error", &msg),
    }
}

pub fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse::json(
        status_code,
        status_text,
        format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    )
}
