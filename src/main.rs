mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // GitHub OAuth is optional: without it the site is browsable but read-only.
    let github = services::auth::GitHubConfig::from_env();
    match &github {
        Some(config) => tracing::info!(client_id = %config.client_id, "GitHub OAuth configured"),
        None => tracing::warn!("GitHub OAuth not configured — sign-in disabled"),
    }

    let state = state::AppState::new(pool, github);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "cvmaker listening");
    axum::serve(listener, app).await.expect("server failed");
}
