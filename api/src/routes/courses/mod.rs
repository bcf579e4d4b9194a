//! Course routes under `/api/courses`

pub mod catalogue;
pub mod manage;
pub mod watch;

use actix_web::web;

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;

use crate::middleware::JwtAuth;

/// Mount the course routes. Every route needs a session; writes also need
/// an admin.
pub fn configure<U, C, E, F>(cfg: &mut web::ServiceConfig, auth: JwtAuth)
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    cfg.service(
        web::scope("/api/courses")
            .route(
                "",
                web::get().to(catalogue::list_courses::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "",
                web::post().to(manage::create_course::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/count-by-category/{category}",
                web::get()
                    .to(catalogue::count_by_category::<U, C, E, F>)
                    .wrap(auth.clone()),
            )
            .route(
                "/{id}",
                web::get().to(catalogue::get_course::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}",
                web::put().to(manage::update_course::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}",
                web::delete().to(manage::delete_course::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/chapters",
                web::post().to(manage::add_chapter::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/chapters/{chapter_id}/watch",
                web::get().to(watch::watch_chapter::<U, C, E, F>).wrap(auth),
            ),
    );
}
