use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use lg_api::{create_app, AppState, HttpSettings};
use lg_core::repositories::{
    CourseRepository, InMemoryCourseRepository, InMemoryUserRepository, UserRepository,
};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_infra::database::{DatabasePool, MySqlCourseRepository, MySqlUserRepository};
use lg_infra::{create_email_service, spawn_keep_alive, LocalFileStorage};
use lg_shared::config::LogFormat;
use lg_shared::{AppConfig, LoggingConfig, StorageBackend};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!("Starting LearnGate API ({:?})", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; sessions are signed with the built-in development secret");
    }

    let email = Arc::new(create_email_service(&config.email));
    info!("Email provider: {}", email.name());

    let storage = Arc::new(
        LocalFileStorage::new(&config.upload)
            .await
            .context("preparing upload directory")?,
    );

    match config.database.backend {
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("connecting to MySQL")?;
            if config.database.run_migrations {
                pool.run_migrations().await.context("running migrations")?;
                info!("Database migrations applied");
            }

            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let courses = Arc::new(MySqlCourseRepository::new(pool.get_pool().clone()));
            let result = run_server(&config, users, courses, email, storage, "mysql").await;
            pool.close().await;
            result
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all data is lost on restart");
            let users = Arc::new(InMemoryUserRepository::new());
            let courses = Arc::new(InMemoryCourseRepository::new());
            run_server(&config, users, courses, email, storage, "memory").await
        }
    }
}

async fn run_server<U, C, E, F>(
    config: &AppConfig,
    users: Arc<U>,
    courses: Arc<C>,
    email: Arc<E>,
    storage: Arc<F>,
    backend: &str,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let state = web::Data::new(AppState::new(config, users, courses, email, storage, backend));

    if let (Ok(email), Ok(password)) = (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
        let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string());
        match state.auth_service.ensure_admin(&name, &email, &password).await {
            Ok(admin) => info!("Administrator account ready: {}", admin.email),
            Err(error) => warn!("Could not provision administrator {}: {}", email, error),
        }
    }

    let keep_alive = spawn_keep_alive(&config.keep_alive);

    let settings = HttpSettings {
        environment: config.environment,
        cors: config.cors.clone(),
        max_payload_size: config.server.max_payload_size,
    };
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &settings));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await?;

    if let Some(handle) = keep_alive {
        handle.abort();
    }
    info!("Server stopped");
    Ok(())
}
