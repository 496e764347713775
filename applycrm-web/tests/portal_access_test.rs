//! Role-gated page navigation over HTTP

mod helpers;

use helpers::{assert_is_redirect_to_login, spawn_app};
use serde_json::Value;

const PORTAL_PATHS: [&str; 6] = [
    "/student/dashboard",
    "/student/progress",
    "/agent/dashboard",
    "/agent/submissions",
    "/internal/dashboard",
    "/internal/users",
];

#[tokio::test]
async fn public_pages_render_without_session() {
    let app = spawn_app().await;

    for (path, page) in [("/", "landing"), ("/login", "login"), ("/register", "register")] {
        let response = app.get(path).await;
        assert_eq!(response.status().as_u16(), 200, "{}", path);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["page"], page);
    }
}

#[tokio::test]
async fn anonymous_visitor_is_redirected_everywhere_gated() {
    let app = spawn_app().await;

    for path in PORTAL_PATHS {
        assert_is_redirect_to_login(&app.get(path).await);
    }
    assert_is_redirect_to_login(&app.get("/somewhere/else").await);
    assert_is_redirect_to_login(&app.get("/api/unknown").await);
}

#[tokio::test]
async fn student_reaches_only_student_portal() {
    let app = spawn_app().await;
    app.post_login("student@demo.com", "demo123", "public").await;

    let response = app.get("/student/progress").await;
    assert_eq!(response.status().as_u16(), 200);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["area"], "student");
    assert_eq!(view["path"], "/student/progress");
    assert_eq!(view["view"]["portal"], "student");
    assert_eq!(view["view"]["view"], "progress");
    assert_eq!(view["nav"].as_array().unwrap().len(), 4);

    for path in PORTAL_PATHS.iter().filter(|p| !p.starts_with("/student")) {
        assert_is_redirect_to_login(&app.get(path).await);
    }
}

#[tokio::test]
async fn approved_agent_reaches_agent_portal() {
    let app = spawn_app().await;
    app.post_login("agent@demo.com", "demo123", "public").await;

    let view: Value = app.get("/agent/students").await.json().await.unwrap();
    assert_eq!(view["view"], serde_json::json!({"portal": "agent", "view": "students"}));

    assert_is_redirect_to_login(&app.get("/student/dashboard").await);
    assert_is_redirect_to_login(&app.get("/internal/dashboard").await);
}

#[tokio::test]
async fn admin_sees_overview_dashboard_and_full_nav() {
    let app = spawn_app().await;
    let login: Value = app
        .post_login("admin@demo.com", "demo123", "internal")
        .await
        .json()
        .await
        .unwrap();

    let landing = login["redirect"].as_str().unwrap();
    let view: Value = app.get(landing).await.json().await.unwrap();
    assert_eq!(
        view["view"],
        serde_json::json!({
            "portal": "internal",
            "view": {"dashboard": "super_admin", "section": "overview"}
        })
    );
    assert_eq!(view["nav"].as_array().unwrap().len(), 7);

    let users: Value = app.get("/internal/users").await.json().await.unwrap();
    assert_eq!(users["view"]["view"]["section"], "users");
}

#[tokio::test]
async fn officer_is_limited_to_own_section() {
    let app = spawn_app().await;
    app.post_login("marketing@demo.com", "demo123", "internal").await;

    let view: Value = app.get("/internal/dashboard").await.json().await.unwrap();
    assert_eq!(view["view"]["view"]["dashboard"], "marketing_officer");

    let nav: Value = app.get("/api/nav").await.json().await.unwrap();
    let paths: Vec<_> = nav
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["/internal/dashboard", "/internal/marketing"]);

    assert_eq!(app.get("/internal/marketing").await.status().as_u16(), 200);
    assert_is_redirect_to_login(&app.get("/internal/users").await);
    assert_is_redirect_to_login(&app.get("/internal/cases").await);
}

#[tokio::test]
async fn path_matching_is_by_segment() {
    let app = spawn_app().await;
    app.post_login("student@demo.com", "demo123", "public").await;

    assert_eq!(app.get("/student").await.status().as_u16(), 200);
    assert_eq!(app.get("/student/").await.status().as_u16(), 200);
    assert_is_redirect_to_login(&app.get("/studentx").await);
    assert_is_redirect_to_login(&app.get("/student/documents/42").await);
}
