//! Mapping of domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use once_cell::sync::Lazy;
use uuid::Uuid;

use lg_core::errors::{AuthError, DomainError, SubscriptionError, TokenError, ValidationError};
use lg_shared::{error_codes, Environment, ErrorResponse};

/// Debug output is attached to error bodies outside production
static EXPOSE_DETAILS: Lazy<bool> = Lazy::new(|| Environment::from_env().exposes_error_details());

pub const RESOURCE_NOT_FOUND: &str = "Resource not found";

/// Status code and error code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserAlreadyExists => (StatusCode::BAD_REQUEST, error_codes::DUPLICATE_VALUE),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AuthError::AlreadyVerified => (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST),
            AuthError::InvalidCredentials => (StatusCode::BAD_REQUEST, error_codes::INVALID_CREDENTIALS),
            AuthError::EmailNotVerified => (StatusCode::UNAUTHORIZED, error_codes::EMAIL_NOT_VERIFIED),
            AuthError::InvalidOtp => (StatusCode::BAD_REQUEST, error_codes::OTP_INVALID),
            AuthError::OtpExpired => (StatusCode::BAD_REQUEST, error_codes::OTP_EXPIRED),
            AuthError::OtpAttemptsExceeded => (StatusCode::TOO_MANY_REQUESTS, error_codes::OTP_ATTEMPTS_EXCEEDED),
            AuthError::ResetNotAuthorized => (StatusCode::BAD_REQUEST, error_codes::OTP_INVALID),
            AuthError::IncorrectCurrentPassword => (StatusCode::BAD_REQUEST, error_codes::INVALID_CREDENTIALS),
            AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
            AuthError::AdminRequired | AuthError::AccessDenied => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
            TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
            TokenError::TokenGenerationFailed => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
        },
        DomainError::ValidationErr(validation_error) => match validation_error {
            ValidationError::DuplicateValue { .. } => (StatusCode::BAD_REQUEST, error_codes::DUPLICATE_VALUE),
            ValidationError::UnsupportedImageType { .. } => (StatusCode::BAD_REQUEST, error_codes::UNSUPPORTED_MEDIA),
            ValidationError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, error_codes::PAYLOAD_TOO_LARGE),
            _ => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        },
        DomainError::Subscription(subscription_error) => match subscription_error {
            SubscriptionError::TrialLimitReached { .. } => (StatusCode::FORBIDDEN, error_codes::TRIAL_LIMIT_REACHED),
            SubscriptionError::AlreadyActive => (StatusCode::BAD_REQUEST, error_codes::SUBSCRIPTION_CONFLICT),
            SubscriptionError::UnsupportedTransition { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        },
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    if status.is_server_error() {
        log::error!("Domain error: {:?}", error);
    } else {
        log::debug!("Request rejected ({}): {}", status.as_u16(), error);
    }

    let mut body = ErrorResponse::new(code, error.to_string());
    if let DomainError::Subscription(SubscriptionError::TrialLimitReached { watched, max }) = error {
        body = body.add_detail("trialVideosWatched", watched).add_detail("maxTrialVideos", max);
    }
    if *EXPOSE_DETAILS {
        body = body.add_detail("debug", format!("{:?}", error));
    }

    HttpResponse::build(status).json(body)
}

/// 404 for ids that do not parse
pub fn resource_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, RESOURCE_NOT_FOUND))
}

/// 400 with field errors from `validator`
pub fn validation_failed(errors: &validator::ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    let message = match fields.as_slice() {
        [] => "Invalid request data".to_string(),
        fields => format!("Invalid or missing fields: {}", fields.join(", ")),
    };
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, message).add_detail("validation_errors", errors),
    )
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

/// Error returned by handlers; renders through [`handle_domain_error`]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Domain(DomainError),
    #[error("validation failed: {0}")]
    Invalid(validator::ValidationErrors),
    /// Path id that does not parse
    #[error("Resource not found")]
    UnknownId,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => classify(error).0,
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownId => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(error) => handle_domain_error(error),
            ApiError::Invalid(errors) => validation_failed(errors),
            ApiError::UnknownId => resource_not_found(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

macro_rules! api_error_from {
    ($($source:ty),*) => {
        $(impl From<$source> for ApiError {
            fn from(error: $source) -> Self {
                ApiError::Domain(error.into())
            }
        })*
    };
}

api_error_from!(AuthError, TokenError, ValidationError, SubscriptionError);

pub type ApiResult = Result<HttpResponse, ApiError>;

/// Parse a path id; anything that is not a UUID is an unknown resource
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::UnknownId)
}

/// Run `validator` checks on a request body
pub fn validate<T: validator::Validate>(body: &T) -> Result<(), ApiError> {
    body.validate().map_err(ApiError::Invalid)
}
