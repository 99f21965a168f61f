use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{extract_bearer_token, AuthError, AuthService, UserSession};

/// Session resolution middleware.
///
/// Never rejects a request: a missing or unusable `Authorization` header just
/// leaves the request anonymous. When the bearer token resolves to a user the
/// [`UserSession`] is added to the request extensions.
pub async fn session_middleware(
    State(auth_service): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request.headers().get(AUTHORIZATION).cloned();
    if let Some(header) = header {
        match resolve_header(&auth_service, &header).await {
            Ok(Some(session)) => {
                tracing::debug!(
                    user_id = %session.user.id,
                    expires_at = %session.expires_at,
                    "request authenticated"
                );
                request.extensions_mut().insert(session);
            }
            Ok(None) => tracing::debug!("token subject no longer exists"),
            Err(err) => tracing::debug!(error = %err, "ignoring unusable authorization header"),
        }
    }

    next.run(request).await
}

async fn resolve_header(
    auth_service: &AuthService,
    header: &HeaderValue,
) -> Result<Option<UserSession>, AuthError> {
    let auth_header = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeaderFormat)?;
    let token = extract_bearer_token(auth_header)?;
    auth_service.resolve_session(token).await
}

/// CORS configuration for browser GraphQL clients
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Security headers middleware
pub fn security_headers_layer() -> tower_http::set_header::SetResponseHeaderLayer<HeaderValue> {
    tower_http::set_header::SetResponseHeaderLayer::overriding(
        axum::http::header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    )
}
