//! User routes under `/api/users`

pub mod account;
pub mod admin;
pub mod payments;
pub mod session;

use actix_web::web;

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;

use crate::middleware::JwtAuth;

/// Mount the user routes. `auth` guards every route that needs a session.
pub fn configure<U, C, E, F>(cfg: &mut web::ServiceConfig, auth: JwtAuth)
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    cfg.service(
        web::scope("/api/users")
            // Public
            .route("/register", web::post().to(session::register::<U, C, E, F>))
            .route("/verify-otp", web::post().to(session::verify_otp::<U, C, E, F>))
            .route("/resend-otp", web::post().to(session::resend_otp::<U, C, E, F>))
            .route("/login", web::post().to(session::login::<U, C, E, F>))
            .route("/logout", web::post().to(session::logout::<U, C, E, F>))
            .route("/send-otp", web::post().to(session::send_reset_otp::<U, C, E, F>))
            .route("/verify-otp-reset", web::post().to(session::verify_reset_otp::<U, C, E, F>))
            .route("/reset-password", web::post().to(session::reset_password::<U, C, E, F>))
            // Signed in
            .route(
                "/me",
                web::get().to(account::me::<U, C, E, F>).wrap(auth.clone()),
            )
            // Admin
            .route(
                "",
                web::get().to(admin::list_users::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/payments/pending",
                web::get().to(admin::pending_payments::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/dashboard/users-payments",
                web::get().to(admin::payment_stats::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/subscription",
                web::put().to(admin::update_subscription::<U, C, E, F>).wrap(auth.clone()),
            )
            // Path used by the admin dashboard
            .route(
                "/{id}/payment-subscription",
                web::put().to(admin::update_subscription::<U, C, E, F>).wrap(auth.clone()),
            )
            // Self or admin
            .route(
                "/{id}",
                web::get().to(account::get_user::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/profile",
                web::put().to(account::update_profile::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/password",
                web::put().to(account::change_password::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/payment-receipt",
                web::put().to(payments::upload_payment_receipt::<U, C, E, F>).wrap(auth.clone()),
            )
            .route(
                "/{id}/trial-video",
                web::patch().to(payments::record_trial_video::<U, C, E, F>).wrap(auth),
            ),
    );
}
