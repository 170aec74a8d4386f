/// Access control middleware - HTTP Basic authentication and route rules
use crate::{
    config::Role,
    error::ServerError,
    services::{AuthService, Principal},
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// What a request must present to pass a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Role(Role),
}

/// One entry of the access table
///
/// `pattern` is either an exact path or a prefix ending in `/**`, which
/// matches the prefix itself and everything beneath it.
#[derive(Debug, Clone)]
pub struct AccessRule {
    method: Option<Method>,
    pattern: String,
    requirement: Requirement,
}

impl AccessRule {
    /// Rule applying to every method
    pub fn any(pattern: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            method: None,
            pattern: pattern.into(),
            requirement,
        }
    }

    /// Rule applying to a single method
    pub fn method(method: Method, pattern: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            method: Some(method),
            pattern: pattern.into(),
            requirement,
        }
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        let method_matches = match &self.method {
            Some(m) => m == method,
            None => true,
        };
        method_matches && path_matches(&self.pattern, path)
    }
}

/// Ordered access table, evaluated first-match
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// Requirement of the first matching rule; authentication when none match
    pub fn requirement(&self, method: &Method, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map_or(Requirement::Authenticated, |rule| rule.requirement)
    }
}

impl Default for AccessPolicy {
    /// Documentation is public, deleting playlists takes ADMIN, the rest
    /// needs any authenticated account
    fn default() -> Self {
        Self::new(vec![
            AccessRule::any("/swagger-ui/**", Requirement::Public),
            AccessRule::any("/api-docs/**", Requirement::Public),
            AccessRule::method(Method::DELETE, "/lists/**", Requirement::Role(Role::Admin)),
            AccessRule::any("/lists/**", Requirement::Authenticated),
            AccessRule::any("/**", Requirement::Authenticated),
        ])
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some("") => true,
        Some(prefix) => {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => path == pattern,
    }
}

/// State of the access middleware
#[derive(Debug, Clone)]
pub struct AccessControl {
    pub policy: AccessPolicy,
    pub auth: Arc<AuthService>,
}

impl AccessControl {
    pub fn new(policy: AccessPolicy, auth: Arc<AuthService>) -> Self {
        Self { policy, auth }
    }
}

/// Extension type to store the authenticated principal in the request
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Middleware enforcing the access policy
///
/// Missing or wrong credentials get a 401 with a Basic challenge; a valid
/// account lacking the required role gets a 403.
pub async fn access_middleware(
    State(access): State<Arc<AccessControl>>,
    mut request: Request,
    next: Next,
) -> Response {
    let requirement = access
        .policy
        .requirement(request.method(), request.uri().path());

    if requirement == Requirement::Public {
        return next.run(request).await;
    }

    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let principal = match header {
        Some(header) => match authenticate(Arc::clone(&access.auth), header).await {
            Ok(principal) => principal,
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    let Some(principal) = principal else {
        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            "Rejected unauthenticated request"
        );
        return challenge(access.auth.realm());
    };

    if let Requirement::Role(role) = requirement {
        if !principal.has_role(role) {
            tracing::warn!(
                user = %principal.username,
                method = %request.method(),
                path = request.uri().path(),
                "Missing role {}",
                role.as_str()
            );
            return ServerError::Forbidden(format!("Role {} required", role.as_str()))
                .into_response();
        }
    }

    request.extensions_mut().insert(AuthenticatedUser(principal));

    next.run(request).await
}

/// Verify credentials on the blocking pool
async fn authenticate(
    auth: Arc<AuthService>,
    header: String,
) -> Result<Option<Principal>, ServerError> {
    tokio::task::spawn_blocking(move || auth.authenticate_header(&header))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
}

fn challenge(realm: &str) -> Response {
    let mut response =
        ServerError::Auth("Full authentication is required".to_string()).into_response();

    if let Ok(value) = HeaderValue::from_str(&format!("Basic realm=\"{realm}\"")) {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, value);
    }

    response
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
