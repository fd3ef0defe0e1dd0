//! CORS middleware

use tower_http::cors::CorsLayer;

/// Permissive CORS for development use
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
