use colorbook_config::CorsConfig;
use http::{Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// The API only needs `GET` and multipart `POST`, so methods and headers
/// are fixed; origins and preflight caching come from config.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    layer = if config.allows_any_origin() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<_> = config
            .allow_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        layer.allow_origin(origins)
    };

    if let Some(max_age) = config.max_age {
        layer = layer.max_age(max_age);
    }

    layer
}
