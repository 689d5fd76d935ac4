use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::info;

use crate::pages;
use crate::router::AppState;
use crate::session::{self, AUTH_CLAIM, AUTH_COOKIE, SESSION_TTL};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub pin: String,
}

/// GET /login
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(pages::login_page(query.error.is_some()))
}

/// POST /login -> session cookie + `/` on a PIN match, `/login?error=1`
/// otherwise. No lockout and no attempt counting, by requirement.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    if !bool::from(form.pin.as_bytes().ct_eq(state.config.pin.as_bytes())) {
        return Redirect::to("/login?error=1").into_response();
    }

    let token = session::issue(AUTH_CLAIM, &state.config.cookie_secret);
    let jar = jar.add(build_auth_cookie(token));
    info!("operator logged in");
    (jar, Redirect::to("/")).into_response()
}

/// GET /logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(clear_auth_cookie()), Redirect::to("/login"))
}

fn build_auth_cookie(token: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL)
        .build()
}

fn clear_auth_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(AUTH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
