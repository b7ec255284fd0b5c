use sea_orm::Database;
use tracing::info;

use friendlytask::config::AppConfig;
use friendlytask::infra::storage::FsPictureStore;
use friendlytask::router::build_router;
use friendlytask::state::AppState;
use friendlytask_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        pictures: FsPictureStore::new(&config.picture_dir),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.app_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("friendlytask listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
