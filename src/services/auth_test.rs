use super::*;

// =============================================================================
// GitHubConfig::from_env — env manipulation requires unsafe in edition 2024,
// and the three vars are shared, so these tests serialize on a module lock.
// =============================================================================

static ENV_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_GUARD.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

unsafe fn clear_github_env() {
    unsafe {
        std::env::remove_var("GITHUB_CLIENT_ID");
        std::env::remove_var("GITHUB_CLIENT_SECRET");
        std::env::remove_var("GITHUB_REDIRECT_URI");
    }
}

#[test]
fn from_env_all_set_returns_some() {
    let _guard = lock_env();
    unsafe {
        clear_github_env();
        std::env::set_var("GITHUB_CLIENT_ID", "id123");
        std::env::set_var("GITHUB_CLIENT_SECRET", "secret456");
        std::env::set_var("GITHUB_REDIRECT_URI", "http://localhost/callback");
    }
    let config = GitHubConfig::from_env().expect("config should load");
    assert_eq!(config.client_id, "id123");
    assert_eq!(config.client_secret, "secret456");
    assert_eq!(config.redirect_uri, "http://localhost/callback");
    unsafe { clear_github_env() };
}

#[test]
fn from_env_partial_returns_none() {
    let _guard = lock_env();
    unsafe {
        clear_github_env();
        std::env::set_var("GITHUB_CLIENT_ID", "id123");
    }
    assert!(GitHubConfig::from_env().is_none());
    unsafe { clear_github_env() };
}

#[test]
fn from_env_all_missing_returns_none() {
    let _guard = lock_env();
    unsafe { clear_github_env() };
    assert!(GitHubConfig::from_env().is_none());
}

// =============================================================================
// authorize_url
// =============================================================================

fn test_config() -> GitHubConfig {
    GitHubConfig {
        client_id: "client-abc".into(),
        client_secret: "shhh".into(),
        redirect_uri: "http://localhost:3000/auth/github/callback".into(),
    }
}

#[test]
fn authorize_url_carries_client_and_state() {
    let url = test_config().authorize_url("csrf-token-1");
    assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
    assert!(url.contains("client_id=client-abc"));
    assert!(url.contains("state=csrf-token-1"));
}

#[test]
fn authorize_url_requests_email_scope() {
    let url = test_config().authorize_url("s");
    assert!(url.contains("user:email"));
}

#[test]
fn authorize_url_never_leaks_secret() {
    let url = test_config().authorize_url("s");
    assert!(!url.contains("shhh"));
}

// =============================================================================
// pick_account_email
// =============================================================================

fn email(addr: &str, primary: bool, verified: bool) -> GitHubEmail {
    GitHubEmail { email: addr.into(), primary, verified }
}

#[test]
fn picks_verified_primary_first() {
    let emails = vec![
        email("old@example.com", false, true),
        email("main@example.com", true, true),
    ];
    assert_eq!(pick_account_email(&emails), Some("main@example.com".into()));
}

#[test]
fn unverified_primary_is_skipped() {
    let emails = vec![
        email("main@example.com", true, false),
        email("backup@example.com", false, true),
    ];
    assert_eq!(pick_account_email(&emails), Some("backup@example.com".into()));
}

#[test]
fn no_verified_email_is_none() {
    let emails = vec![email("main@example.com", true, false)];
    assert_eq!(pick_account_email(&emails), None);
}

#[test]
fn empty_list_is_none() {
    assert_eq!(pick_account_email(&[]), None);
}
