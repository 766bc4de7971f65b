//! Authentication gate
//!
//! Resolves the bearer token on a request into the stored user it names.
//! Every request re-validates the token and re-reads the user; nothing is
//! cached between requests.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use blog_shared::{AuthError, User};
use tracing::debug;

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Validate the request's token and load the user it names
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    let token = bearer_token(headers)?;

    let claims = state.jwt().validate(token).map_err(|reason| {
        debug!(%reason, "Rejected bearer token");
        match reason {
            crate::auth::TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    })?;

    let username = claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or(AuthError::MissingSubject)?;

    let user = UserRepository::find_by_username(state.db(), &username)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            debug!(%username, "Token subject has no matching user");
            AuthError::UnknownUser
        })?;

    Ok(CurrentUser::from(user))
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_auth` on this request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        authenticate(&app_state, &parts.headers).await
    }
}

/// Middleware that rejects unauthenticated requests for a whole router
///
/// The resolved user is stored in the request extensions so handlers that
/// also extract [`CurrentUser`] do not repeat the lookup.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, request.headers()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
