//! GitHub OAuth service — code exchange, profile + email fetch, user upsert.
//!
//! The account identity key is the GitHub account's primary email: signing in
//! looks the user up by email and creates the row on first sign-in.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// GitHub OAuth configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl GitHubConfig {
    /// Load from `GITHUB_CLIENT_ID`, `GITHUB_CLIENT_SECRET`, `GITHUB_REDIRECT_URI`.
    /// Returns `None` if any are missing (sign-in will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("GITHUB_CLIENT_ID").ok()?;
        let client_secret = std::env::var("GITHUB_CLIENT_SECRET").ok()?;
        let redirect_uri = std::env::var("GITHUB_REDIRECT_URI").ok()?;
        Some(Self { client_id, client_secret, redirect_uri })
    }

    /// Build the GitHub authorization URL carrying the CSRF `state`.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "https://github.com/login/oauth/authorize?client_id={}&redirect_uri={}&scope=read:user%20user:email&state={}",
            self.client_id, self.redirect_uri, state
        )
    }
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct GitHubUser {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    pub primary: bool,
    pub verified: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("github token exchange failed: {0}")]
    TokenExchange(String),
    #[error("github api error: {0}")]
    GitHubApi(String),
    #[error("github account has no usable email")]
    MissingEmail,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Exchange an OAuth code for an access token.
///
/// # Errors
///
/// Returns `TokenExchange` if the request fails or the response is malformed.
pub async fn exchange_code(config: &GitHubConfig, code: &str) -> Result<String, AuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .post("https://github.com/login/oauth/access_token")
        .header("Accept", "application/json")
        .json(&serde_json::json!({
            "client_id": config.client_id,
            "client_secret": config.client_secret,
            "code": code,
            "redirect_uri": config.redirect_uri,
        }))
        .send()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    let body = resp
        .text()
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
    let token_resp: TokenResponse =
        serde_json::from_str(&body).map_err(|_| AuthError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token_resp.access_token)
}

async fn github_get<T: serde::de::DeserializeOwned>(access_token: &str, url: &str) -> Result<T, AuthError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(url)
        .header("Authorization", format!("Bearer {access_token}"))
        .header("User-Agent", "cvmaker")
        .send()
        .await
        .map_err(|e| AuthError::GitHubApi(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::GitHubApi(format!("{status}: {body}")));
    }

    resp.json::<T>()
        .await
        .map_err(|e| AuthError::GitHubApi(e.to_string()))
}

/// Fetch the authenticated GitHub user's profile.
///
/// # Errors
///
/// Returns `GitHubApi` on transport or decode failure.
pub async fn fetch_github_user(access_token: &str) -> Result<GitHubUser, AuthError> {
    github_get(access_token, "https://api.github.com/user").await
}

/// Pick the address to key the account on: the verified primary if present,
/// otherwise any verified address.
pub(crate) fn pick_account_email(emails: &[GitHubEmail]) -> Option<String> {
    emails
        .iter()
        .find(|e| e.primary && e.verified)
        .or_else(|| emails.iter().find(|e| e.verified))
        .map(|e| e.email.clone())
}

/// Resolve the email address for the authenticated GitHub user. The profile's
/// public email is used when set; otherwise the private email list is queried.
///
/// # Errors
///
/// Returns `MissingEmail` if no verified address exists.
pub async fn fetch_account_email(access_token: &str, user: &GitHubUser) -> Result<String, AuthError> {
    if let Some(email) = &user.email {
        return Ok(email.clone());
    }

    let emails: Vec<GitHubEmail> = github_get(access_token, "https://api.github.com/user/emails").await?;
    pick_account_email(&emails).ok_or(AuthError::MissingEmail)
}

/// Look up the user by email, creating the row on first sign-in. The profile
/// fields are refreshed on every sign-in. Returns the user's UUID.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn upsert_user(pool: &PgPool, email: &str, gh: &GitHubUser) -> Result<Uuid, AuthError> {
    let display_name = gh.name.clone().unwrap_or_else(|| gh.login.clone());
    let row = sqlx::query(
        r"INSERT INTO users (email, name, avatar_url, github_id)
          VALUES ($1, $2, $3, $4)
          ON CONFLICT (email) DO UPDATE
              SET name = EXCLUDED.name,
                  avatar_url = EXCLUDED.avatar_url,
                  github_id = EXCLUDED.github_id
          RETURNING id",
    )
    .bind(email)
    .bind(&display_name)
    .bind(&gh.avatar_url)
    .bind(gh.id)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
