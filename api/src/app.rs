//! Application factory
//!
//! Builds the actix-web application from an [`AppState`]: middleware stack,
//! body parsing limits, static uploads, API routes and JSON 404s.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_shared::{CorsConfig, Environment};

use crate::handlers::error::{bad_request, resource_not_found};
use crate::middleware::{create_cors, SecurityMiddleware};
use crate::routes::{courses, health, users};
use crate::state::AppState;

/// Settings that shape the HTTP stack rather than the services
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub environment: Environment,
    pub cors: CorsConfig,
    pub max_payload_size: usize,
}

/// Create and configure the application with all dependencies
pub fn create_app<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    settings: &HttpSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let auth = state.jwt_auth();
    let uploads = actix_files::Files::new(&state.upload.public_prefix, &state.upload.directory);

    let json_config = web::JsonConfig::default()
        .limit(settings.max_payload_size)
        .error_handler(|err, _req| {
            let response = bad_request(format!("Invalid JSON body: {}", err));
            InternalError::from_response(err, response).into()
        });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("Invalid query string: {}", err));
        InternalError::from_response(err, response).into()
    });

    App::new()
        .app_data(state)
        .app_data(json_config)
        .app_data(query_config)
        // Outermost last: tracing, then CORS, then security headers
        .wrap(SecurityMiddleware::for_environment(settings.environment))
        .wrap(create_cors(&settings.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check::<U, C, E, F>))
        .configure(|cfg| users::configure::<U, C, E, F>(cfg, auth.clone()))
        .configure(|cfg| courses::configure::<U, C, E, F>(cfg, auth))
        .service(uploads)
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    resource_not_found()
}
