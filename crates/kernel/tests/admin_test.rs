#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the admin site: guard, dispatch, login, paging.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use adminlte_kernel::Config;

use common::{
    FILLER_USERS, TEST_PASSWORD, TestApp, extract_cookies, location, response_json,
    response_text,
};

// =============================================================================
// Guard
// =============================================================================

#[tokio::test]
async fn anonymous_dashboard_redirects_to_login() {
    let app = TestApp::new();

    let response = app.get("/admin/", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login?next=%2Fadmin%2F");
}

#[tokio::test]
async fn redirect_keeps_query_string_in_next() {
    let app = TestApp::new();

    let response = app.get("/admin/user/list?page=2", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/admin/login?next=%2Fadmin%2Fuser%2Flist%3Fpage%3D2"
    );
}

#[tokio::test]
async fn non_staff_session_is_redirected() {
    let app = TestApp::new();

    // viewer can authenticate but the login view refuses non-staff, so there
    // is no way to obtain a session for it.
    let response = app.post_login("/admin/login", "viewer", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookies = extract_cookies(&response);

    let response = app.get("/admin/", &cookies).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn staff_sees_dashboard() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/admin/index", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.contains("Welcome, Ada Lovelace."));
    assert!(html.contains("Member since March 1, 2024"));
    assert!(html.contains(r#"href="/admin/user/list""#));
}

#[tokio::test]
async fn root_path_highlights_dashboard() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    for uri in ["/admin", "/admin/"] {
        let response = app.get(uri, &cookies).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");

        let html = response_text(response).await;
        assert!(
            html.contains("Dashboard <small>Overview</small>"),
            "dashboard not current at {uri}"
        );
    }
}

#[tokio::test]
async fn child_view_opens_its_group() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/admin/user/profile", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.contains(r#"<li class="treeview active">"#));
    assert!(html.contains("<b>Username</b> <span class=\"pull-right\">admin</span>"));
}

#[tokio::test]
async fn only_the_current_entry_is_active() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/admin/user/list", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert_eq!(html.matches(r#"<li class="active">"#).count(), 1);
    assert_eq!(html.matches(r#"<li class="treeview active">"#).count(), 1);

    let start = html.find(r#"<li class="active">"#).unwrap();
    let end = start + html[start..].find("</li>").unwrap();
    assert!(html[start..end].contains(r#"href="/admin/user/list""#));
    assert!(html[start..end].contains("Users"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/admin/does/not/exist", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Outside the prefix entirely.
    let response = app.get("/administrator", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_method_is_405_with_allow() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app
        .request_with_cookies(
            Request::delete("/admin/index").body(Body::empty()).unwrap(),
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, HEAD");

    let response = app
        .request(
            Request::builder()
                .method(Method::PUT)
                .uri("/admin/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "GET, HEAD, POST"
    );
}

#[tokio::test]
async fn custom_prefix_mounts_views() {
    let app = TestApp::with_config(Config {
        admin_prefix: "/backoffice/".to_string(),
        secure_cookies: false,
        ..Config::default()
    });

    let response = app.get("/backoffice/user/list", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/backoffice/login?next=%2Fbackoffice%2Fuser%2Flist"
    );

    let response = app.get("/admin/user/list", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Login / logout
// =============================================================================

#[tokio::test]
async fn login_form_renders_for_anonymous() {
    let app = TestApp::new();

    let response = app.get("/admin/login?next=%2Fadmin%2Fuser%2Flist", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.contains("Sign in to start your session"));
    // Tera escapes `/` in attribute values.
    assert!(html.contains(r#"action="&#x2F;admin&#x2F;login?next=%2Fadmin%2Fuser%2Flist""#));
}

#[tokio::test]
async fn login_redirects_to_next() {
    let app = TestApp::new();

    let response = app
        .post_login("/admin/login?next=%2Fadmin%2Fuser%2Flist", "admin", TEST_PASSWORD)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/user/list");
    assert!(!extract_cookies(&response).is_empty());
}

#[tokio::test]
async fn login_ignores_foreign_next() {
    let app = TestApp::new();

    let response = app
        .post_login(
            "/admin/login?next=https%3A%2F%2Fevil.example%2F",
            "admin",
            TEST_PASSWORD,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/index");
}

#[tokio::test]
async fn login_ignores_next_with_control_characters() {
    let app = TestApp::new();

    for next in ["%2F%09%2Fevil.example%2F", "%2F%0A%2Fevil.example%2F"] {
        let response = app
            .post_login(&format!("/admin/login?next={next}"), "admin", TEST_PASSWORD)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/index", "{next}");
    }
}

#[tokio::test]
async fn wrong_password_rerenders_form() {
    let app = TestApp::new();

    let response = app.post_login("/admin/login", "admin", "wrong").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.contains("Invalid username or password."));
    assert!(html.contains(r#"value="admin""#));
}

#[tokio::test]
async fn inactive_and_non_staff_accounts_are_refused() {
    let app = TestApp::new();

    let response = app.post_login("/admin/login", "retired", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response_text(response).await.contains("Invalid username or password."));

    let response = app.post_login("/admin/login", "viewer", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response_text(response)
            .await
            .contains("does not have access to the admin site")
    );
}

#[tokio::test]
async fn logout_ends_session() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/admin/index", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/admin/logout", &cookies).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");

    let response = app.get("/admin/index", &cookies).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn user_list_paginates() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    // admin, viewer, retired, user01..user25; page 2 of 10 is user08..user17.
    let response = app.get("/admin/user/list?page=2&size=10", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.contains(&format!("{} users", FILLER_USERS + 3)));
    assert!(html.contains("<td>user08</td>"));
    assert!(html.contains("<td>user17</td>"));
    assert!(!html.contains("<td>user07</td>"));
    assert!(!html.contains("<td>user18</td>"));
    assert!(html.contains("?page=3&amp;size=10"));
}

#[tokio::test]
async fn user_list_uses_default_page_size() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/admin/user/list", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response_text(response).await;
    assert!(html.contains("<td>admin</td>"));
    assert!(html.contains("<td>user17</td>"));
    assert!(!html.contains("<td>user18</td>"));
}

#[tokio::test]
async fn user_list_page_past_end_is_empty() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/admin/user/list?page=99", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response_text(response).await.contains("<td>admin</td>"));
}

#[tokio::test]
async fn invalid_page_parameters_are_bad_requests() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    for uri in [
        "/admin/user/list?page=abc",
        "/admin/user/list?size=ten",
        "/admin/user/list?page=0",
        "/admin/user/list?size=0",
    ] {
        let response = app.get(uri, &cookies).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

// =============================================================================
// Health and API
// =============================================================================

#[tokio::test]
async fn health_reports_counts() {
    let app = TestApp::new();

    let response = app.get("/health", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["views"], 5);
    assert_eq!(json["users"], FILLER_USERS + 3);
}

#[tokio::test]
async fn api_requires_staff() {
    let app = TestApp::new();

    let response = app.get("/api/admin/menus", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/admin/login?next=%2Fapi%2Fadmin%2Fmenus"
    );
}

#[tokio::test]
async fn api_lists_menus_and_routes() {
    let app = TestApp::new();
    let cookies = app.login_staff().await;

    let response = app.get("/api/admin/menus", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
    let menus = response_json(response).await;
    assert_eq!(menus[0]["name"], "Dashboard");
    assert_eq!(menus[1]["name"], "System");
    assert_eq!(menus[1]["sub_menus"][0]["view_name"], "adminlte.user.list");

    let response = app.get("/api/admin/routes", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
    let routes = response_json(response).await;
    assert_eq!(routes[0]["pattern"], "^$");
    assert!(routes[0]["name"].is_null());
    assert_eq!(routes[1]["name"], "adminlte.index");
}
