//! Login and logout.

use axum::response::{IntoResponse, Redirect, Response};
use tracing::{info, warn};
use url::form_urlencoded;

use crate::auth;
use crate::error::AppError;
use crate::guard::NEXT_PARAM;
use crate::view::ViewRequest;

const LOGIN_TEMPLATE: &str = "adminlte/login.html";

/// Whether `next` is a path on this site.
///
/// Rejects absolute and scheme-relative URLs, and anything with whitespace
/// or control characters (browsers drop tabs and newlines while parsing, so
/// `/\t/host` would become `//host`).
pub fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(|c| c.is_control() || c.is_whitespace())
}

/// Where to go after a successful login.
fn redirect_target(request: &ViewRequest, next: Option<&str>) -> String {
    match next {
        Some(next) if is_safe_redirect(next) => next.to_string(),
        _ => request
            .state
            .urls()
            .reverse("adminlte.index")
            .unwrap_or_else(|| format!("{}/", request.state.urls().prefix())),
    }
}

fn render_form(request: &ViewRequest, username: &str, error: Option<&str>) -> Response {
    let mut context = tera::Context::new();
    context.insert("login_action", &request.path_and_query());
    context.insert("username", username);
    if let Some(error) = error {
        context.insert("error", error);
    }
    request.render(LOGIN_TEMPLATE, context)
}

/// `GET`: show the login form.
pub(super) async fn login_form(request: ViewRequest) -> Response {
    render_form(&request, "", None)
}

/// `POST`: check credentials and start a session.
pub(super) async fn login_submit(request: ViewRequest) -> Response {
    let mut username = String::new();
    let mut password = String::new();
    let mut next = request.query.get(NEXT_PARAM).map(str::to_string);

    for (key, value) in form_urlencoded::parse(&request.body) {
        match key.as_ref() {
            "username" => username = value.into_owned(),
            "password" => password = value.into_owned(),
            NEXT_PARAM => next = Some(value.into_owned()),
            _ => {}
        }
    }

    let Some(user) = request.state.users().authenticate(&username, &password) else {
        warn!(username = %username, "failed login attempt");
        return render_form(&request, &username, Some("Invalid username or password."));
    };

    if !user.is_staff {
        warn!(username = %username, "login refused for non-staff account");
        return render_form(
            &request,
            &username,
            Some("This account does not have access to the admin site."),
        );
    }

    if let Err(e) = auth::login(&request.session, user).await {
        return AppError::from(e).into_response();
    }

    info!(username = %user.username, "user logged in");
    Redirect::to(&redirect_target(&request, next.as_deref())).into_response()
}

/// Clear the session and return to the login form.
pub(super) async fn logout(request: ViewRequest) -> Response {
    if let Some(user) = request.user.user() {
        info!(username = %user.username, "user logged out");
    }

    match auth::logout(&request.session).await {
        Ok(()) => Redirect::to(request.state.login_url()).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
