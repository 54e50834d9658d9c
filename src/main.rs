use std::sync::Arc;

use actix_multipart::form::MultipartFormConfig;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

use employee_records::config::Config;
use employee_records::db::{init_db, run_migrations};
use employee_records::docs::ApiDoc;
use employee_records::repository::employee::MySqlEmployeeRepository;
use employee_records::routes;
use employee_records::state::AppState;
use employee_records::utils::asset_store::FsAssetStore;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    // Built once so every worker shares the same insert lock
    let state = Data::new(AppState::new(
        Arc::new(MySqlEmployeeRepository::new(pool)),
        Arc::new(FsAssetStore::new(&config.upload_dir)),
    ));
    let limiter = Arc::new(routes::build_limiter(config.rate_per_min)?);
    let multipart_config = MultipartFormConfig::default()
        .total_limit(config.max_upload_bytes)
        .memory_limit(config.max_upload_bytes);

    info!(addr = %config.server_addr, upload_dir = %config.upload_dir.display(), "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .app_data(multipart_config.clone())
            .configure(|cfg| routes::configure(cfg, limiter.clone()))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
