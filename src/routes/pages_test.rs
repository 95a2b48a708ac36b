use super::*;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;

// =============================================================================
// State table
// =============================================================================

#[test]
fn two_states_are_registered() {
    assert_eq!(STATES.len(), 2);
}

#[test]
fn list_state_binds_url_and_template() {
    let def = state_by_name("projects").unwrap();
    assert_eq!(def.url, "/projects");
    assert_eq!(def.template, "project_list.html");
}

#[test]
fn edit_state_binds_url_and_template() {
    let def = state_by_name("projectEdit").unwrap();
    assert_eq!(def.url, "/projects/{project_id}/edit");
    assert_eq!(def.template, "project_edit.html");
}

#[test]
fn unknown_state_name_is_none() {
    assert!(state_by_name("billing").is_none());
}

// =============================================================================
// parse_project_id
// =============================================================================

#[test]
fn numeric_identifier_parses() {
    assert_eq!(parse_project_id("42"), Some(42));
}

#[test]
fn non_numeric_identifier_is_none() {
    assert_eq!(parse_project_id("draft"), None);
}

#[test]
fn empty_identifier_is_none() {
    assert_eq!(parse_project_id(""), None);
}

// =============================================================================
// inject_bootstrap
// =============================================================================

#[test]
fn bootstrap_replaces_marker() {
    let html = "<body><!-- cvmaker:bootstrap --></body>";
    let out = inject_bootstrap(html, "projects", &serde_json::json!({ "projects": [] }));
    assert!(!out.contains("<!-- cvmaker:bootstrap -->"));
    assert!(out.contains(r#"<script id="bootstrap" type="application/json">"#));
    assert!(out.contains(r#""state":"projects""#));
}

#[test]
fn bootstrap_escapes_angle_brackets() {
    let html = "<!-- cvmaker:bootstrap -->";
    let model = serde_json::json!({ "name": "</script><script>alert(1)</script>" });
    let out = inject_bootstrap(html, "projectEdit", &model);
    assert!(!out.contains("</script><script>"));
    assert!(out.contains("\\u003c/script"));
}

#[test]
fn template_without_marker_is_untouched() {
    let html = "<body>static page</body>";
    let out = inject_bootstrap(html, "projects", &serde_json::json!({}));
    assert_eq!(out, html);
}

// =============================================================================
// fallback
// =============================================================================

#[tokio::test]
async fn fallback_redirects_to_project_list() {
    let response = fallback_to_projects().await.into_response();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/projects")
    );
}
