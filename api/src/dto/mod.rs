//! Request and response bodies. Field names are camelCase and ids are
//! serialized as `_id`.

pub mod course;
pub mod payment;
pub mod user;

pub use course::{
    AddChapterRequest, CategoryCountResponse, ChapterResponse, ChapterSummary, CourseListResponse,
    CourseResponse, ListCoursesQuery, WatchChapterResponse,
};
pub use payment::{PendingPaymentsResponse, SubscriptionUpdateRequest, TrialVideoResponse};
pub use user::{
    AuthMessageResponse, ChangePasswordRequest, EmailRequest, ListUsersQuery, LoginRequest,
    OtpRequest, RegisterRequest, RegisterResponse, ResetPasswordRequest, UpdateProfileRequest,
    UserListResponse, UserResponse,
};
