use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::handlers::health_handler::health;
use crate::store::SharedStore;

const CORS_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

fn cors_layer(cors: &CorsConfig) -> Option<CorsLayer> {
    let origin = match cors {
        CorsConfig::Disabled => return None,
        CorsConfig::Any => AllowOrigin::from(Any),
        CorsConfig::Origins(list) => AllowOrigin::list(
            list.iter()
                .filter_map(|s| HeaderValue::from_str(s).ok())
                .collect::<Vec<HeaderValue>>(),
        ),
    };
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(CORS_METHODS)
            .allow_headers(Any),
    )
}

/// All routes with CORS and request tracing, but no store attached.
pub fn build_router(cors: &CorsConfig) -> Router {
    let mut app = Router::new()
        .merge(crate::routes::event_routes::event_routes())
        .merge(crate::routes::attendee_routes::attendee_routes())
        .route("/health", get(health));

    if let Some(layer) = cors_layer(cors) {
        app = app.layer(layer);
    }

    app.layer(TraceLayer::new_for_http())
}

pub fn create_app(store: SharedStore, cors: &CorsConfig) -> Router {
    build_router(cors).layer(Extension(store))
}
