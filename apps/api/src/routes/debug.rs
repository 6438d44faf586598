use axum::{
    http::{Method, Uri},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// One registered route as reported by `/debug-routes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub path: &'static str,
    pub methods: &'static [&'static str],
}

/// Every route mounted by `build_router`. Keep in sync when adding routes.
pub const ROUTES: &[RouteInfo] = &[
    RouteInfo {
        path: "/",
        methods: &["get"],
    },
    RouteInfo {
        path: "/submit-answers",
        methods: &["post"],
    },
    RouteInfo {
        path: "/api/submit-answers",
        methods: &["post"],
    },
    RouteInfo {
        path: "/debug-routes",
        methods: &["get"],
    },
];

/// GET /debug-routes
pub async fn debug_routes_handler() -> Json<&'static [RouteInfo]> {
    Json(ROUTES)
}

/// Router fallback for anything not in `ROUTES`.
pub async fn not_found_handler(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {method} {}", uri.path()))
}
