//! Session cookie construction

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use lg_shared::config::{SameSitePolicy, SessionConfig};

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    }
}

/// Cookie carrying a freshly issued session token
pub fn session_cookie(config: &SessionConfig, token: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token.to_string())
        .path("/")
        .max_age(Duration::seconds(max_age_seconds))
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(config.same_site))
        .finish()
}

/// Same cookie with an empty value and `Max-Age=0`
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), String::new())
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(config.same_site))
        .finish()
}
