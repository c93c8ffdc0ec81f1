/*
 * Responsibility
 * - POST /login: opens a session and sets the session cookie
 * - GET /me, POST /logout, GET /admin/status: behind the session gate
 *
 * Notes
 * - Login reads its fields through BodyExtractor, so the body is read once and
 *   both fields are answered from the cached copy
 * - Cookie changes are applied by Reply hooks after the JSON body is rendered
 */
use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use cookie::{Cookie, SameSite};
use serde_json::json;
use session_gate::{
    AppError, HttpContext, Reply,
    http::{CurrentUser, SessionToken},
};

use crate::{
    api::v1::dto::sessions::{AdminStatusResponse, LoginRequest, SessionResponse},
    state::AppState,
};

pub async fn login(State(state): State<AppState>, req: Request) -> Reply {
    let mut ctx = HttpContext::with_body_limit(req, state.body_limit);
    // An unreadable body is an error, not a guest login.
    if let Err(err) = ctx.read_body().await {
        tracing::warn!(error = %err, "login body could not be read");
        return AppError::bad_request("request body could not be read").into();
    }
    let req = LoginRequest {
        user_id: state.login.user_id.read_http(&mut ctx).await,
        role: state.login.role.read_http(&mut ctx).await,
    };
    if let Err(msg) = req.validate() {
        return AppError::bad_request(msg).into();
    }

    let user = req.into_user();
    let token = state.sessions.open(user.clone()).await;
    tracing::info!(
        user_id = user.as_ref().map(|u| u.id.as_str()),
        "session opened"
    );

    let cookie = session_cookie(state.cookie_name, token.clone());
    Reply::new(StatusCode::CREATED, SessionResponse { token, user })
        .with_hook(move |res: &mut Response| set_cookie(res, cookie))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Reply {
    Reply::ok(user)
}

pub async fn logout(State(state): State<AppState>, SessionToken(token): SessionToken) -> Reply {
    let revoked = state.sessions.revoke(&token).await;

    let mut cookie = session_cookie(state.cookie_name, String::new());
    cookie.make_removal();
    Reply::ok(json!({ "revoked": revoked }))
        .with_hook(move |res: &mut Response| set_cookie(res, cookie))
}

pub async fn admin_status(CurrentUser(user): CurrentUser) -> Reply {
    match user {
        Some(user) => Reply::ok(AdminStatusResponse {
            status: "ok".to_string(),
            admin: user.id,
        }),
        None => AppError::Forbidden.into(),
    }
}

fn session_cookie(name: String, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn set_cookie(res: &mut Response, cookie: Cookie<'static>) {
    match HeaderValue::from_str(&cookie.encoded().to_string()) {
        Ok(value) => {
            res.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => tracing::error!(error = %err, "invalid set-cookie header"),
    }
}
