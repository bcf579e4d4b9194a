//! Payment receipt submission and trial view counting

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use lg_core::errors::{DomainError, ValidationError};
use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_core::services::subscription::PaymentSubmission;

use crate::dto::{TrialVideoResponse, UserResponse};
use crate::handlers::{parse_id, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;
use crate::upload::read_multipart;

#[derive(Debug, Serialize)]
struct ReceiptResponse {
    message: &'static str,
    user: UserResponse,
}

/// Handler for PUT /api/users/{id}/payment-receipt
///
/// Multipart fields: `paymentReceipt` (image), `paymentMethod`,
/// `paymentAmount`, `payerPhoneNumber`. Moves the account to `pending`.
pub async fn upload_payment_receipt<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: Multipart,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user_id = parse_id(&path)?;
    auth.ensure_can_access(user_id)?;

    let mut form = read_multipart(payload, state.upload.max_file_bytes).await?;
    let receipt = form
        .take_file("paymentReceipt")
        .ok_or_else(|| DomainError::required("paymentReceipt"))?;
    receipt.validate(state.upload.max_file_bytes)?;

    let method = form
        .text("paymentMethod")
        .ok_or_else(|| DomainError::required("paymentMethod"))?
        .to_string();
    let raw_amount = form
        .text("paymentAmount")
        .ok_or_else(|| DomainError::required("paymentAmount"))?;
    let amount: f64 = raw_amount.parse().map_err(|_| ValidationError::InvalidValue {
        field: "paymentAmount".to_string(),
        value: raw_amount.to_string(),
    })?;
    let payer_phone_number = form
        .text("payerPhoneNumber")
        .ok_or_else(|| DomainError::required("payerPhoneNumber"))?
        .to_string();

    // Make sure the account exists before writing anything to disk
    state.user_service.get_user(user_id).await?;

    let stored = state
        .storage
        .store("receipt", &receipt)
        .await
        .map_err(DomainError::internal)?;

    let submission = PaymentSubmission {
        receipt_path: stored.public_path.clone(),
        method,
        amount,
        payer_phone_number,
    };

    match state.subscription_service.submit_payment(user_id, submission).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ReceiptResponse {
            message: "Receipt uploaded, pending approval",
            user: UserResponse::from(&user),
        })),
        Err(error) => {
            if let Err(cleanup) = state.storage.remove(&stored.public_path).await {
                log::warn!("Could not remove rejected receipt {}: {}", stored.public_path, cleanup);
            }
            Err(error.into())
        }
    }
}

/// Handler for PATCH /api/users/{id}/trial-video
///
/// Counts one chapter view against the free allowance. Active subscribers
/// pass without counting.
pub async fn record_trial_video<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user_id = parse_id(&path)?;
    auth.ensure_can_access(user_id)?;

    let access = state.subscription_service.record_video_view(user_id).await?;
    let user = state.user_service.get_user(user_id).await?;

    Ok(HttpResponse::Ok().json(TrialVideoResponse {
        user: UserResponse::from(&user),
        access,
    }))
}
