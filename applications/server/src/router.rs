/// HTTP router assembly
use crate::{
    api::{self, docs::ApiDoc},
    config::{CorsSettings, ServerConfig},
    error::{Result, ServerError},
    middleware::{self, AccessControl, AccessPolicy},
    services::{AuthService, PlaylistService},
    state::AppState,
};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::{self as axum_middleware, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use playlist_core::PlaylistRepository;
use std::{any::Any, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wire services from configuration and build the application router
///
/// Account passwords are hashed here, so this takes a while with a high
/// bcrypt cost.
pub fn build_app(config: &ServerConfig, repository: Arc<dyn PlaylistRepository>) -> Result<Router> {
    let auth = Arc::new(AuthService::from_settings(&config.auth)?);
    let access = Arc::new(AccessControl::new(AccessPolicy::default(), auth));

    let playlists = Arc::new(PlaylistService::new(repository));
    let app_state = AppState::new(playlists);

    let cors = cors_layer(&config.cors)?;

    Ok(create_router(app_state, access, cors))
}

pub fn create_router(
    app_state: AppState,
    access: Arc<AccessControl>,
    cors: Option<CorsLayer>,
) -> Router {
    let routes = Router::new()
        .route(
            "/lists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/lists/:list_name",
            get(api::playlists::get_playlist)
                .put(api::playlists::update_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(no_route)
        .layer(axum_middleware::from_fn(method_not_allowed))
        .layer(axum_middleware::from_fn_with_state(
            access,
            middleware::access_middleware,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new()));

    // Outermost, preflight requests carry no credentials
    let routes = match cors {
        Some(cors) => routes.layer(cors),
        None => routes,
    };

    routes.with_state(app_state)
}

async fn no_route(uri: Uri) -> ServerError {
    ServerError::NoRoute(uri.path().to_string())
}

/// Give axum's bodiless 405 responses the API error shape, keeping `Allow`
async fn method_not_allowed(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut response = ServerError::MethodNotAllowed { method, path }.into_response();
    if let Some(allow) = allow {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

#[allow(clippy::needless_pass_by_value)]
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ServerError::Internal(format!("Handler panicked: {detail}")).into_response()
}

/// CORS layer for the configured origins, `None` when disabled
pub fn cors_layer(settings: &CorsSettings) -> Result<Option<CorsLayer>> {
    if !settings.enabled {
        return Ok(None);
    }

    let origins = settings
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::Config(format!("Invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    Ok(Some(cors))
}
