use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::CookieJar;

use crate::router::AppState;
use crate::session;

/// Ensure the inbound request carries a validly signed session cookie.
/// Anything else (missing cookie, bad signature, wrong claim) redirects to
/// the login page.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth;

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let authorized = jar
            .get(session::AUTH_COOKIE)
            .and_then(|cookie| session::verify(cookie.value(), &state.config.cookie_secret))
            .is_some_and(|claim| claim == session::AUTH_CLAIM);

        if authorized {
            Ok(Self)
        } else {
            Err(Redirect::to("/login"))
        }
    }
}
