use super::*;

#[tokio::test]
async fn new_state_without_github_has_auth_disabled() {
    let state = test_helpers::test_app_state();
    assert!(state.github.is_none());
}

#[tokio::test]
async fn new_state_with_github_keeps_config() {
    let state = test_helpers::test_app_state_with_github();
    let github = state.github.expect("config should be set");
    assert_eq!(github.client_id, "test-client");
}

#[tokio::test]
async fn app_state_is_cheaply_cloneable() {
    let state = test_helpers::test_app_state_with_github();
    let clone = state.clone();
    assert_eq!(
        clone.github.map(|g| g.client_id),
        state.github.map(|g| g.client_id)
    );
}
