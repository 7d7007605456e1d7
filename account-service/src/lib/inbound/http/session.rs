use auth::SignedToken;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use time::OffsetDateTime;

/// Name of the cookie carrying the access token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Cookie attributes for the session token.
///
/// Login and registration attach the token; logout overwrites it with an empty,
/// already-expired cookie under the same name and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookiePolicy {
    secure: bool,
}

impl SessionCookiePolicy {
    /// # Arguments
    /// * `secure` - Emit the `Secure` attribute (production only)
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Cookie holding `token`, living exactly as long as the token itself.
    pub fn session_cookie(&self, token: &SignedToken) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, token.as_str().to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(token.ttl().num_seconds()))
            .build()
    }

    /// Empty cookie expiring at the Unix epoch.
    pub fn clearing_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }

    pub fn attach(&self, jar: CookieJar, token: &SignedToken) -> CookieJar {
        jar.add(self.session_cookie(token))
    }

    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.clearing_cookie())
    }

    /// Session token presented by the client, if any.
    pub fn token_from(jar: &CookieJar) -> Option<&str> {
        jar.get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value())
            .filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::Authenticator;
    use auth::ExtraClaims;
    use auth::ManualClock;
    use auth::TokenConfig;
    use chrono::Utc;

    use super::*;

    fn token() -> SignedToken {
        let config = TokenConfig::new(
            b"access_secret_at_least_32_bytes_long",
            b"refresh_secret_at_least_32_bytes_long",
        )
        .unwrap();
        Authenticator::new(config, Arc::new(ManualClock::new(Utc::now())))
            .issue_access_token("user123", ExtraClaims::new())
            .unwrap()
    }

    #[test]
    fn test_session_cookie_attributes() {
        let token = token();
        let jar = SessionCookiePolicy::new(false).attach(CookieJar::new(), &token);
        let cookie = jar.get(SESSION_COOKIE_NAME).unwrap();

        assert_eq!(cookie.value(), token.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(10)));
        assert!(!cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_secure_attribute_in_production() {
        let cookie = SessionCookiePolicy::new(true).session_cookie(&token());
        assert_eq!(cookie.secure(), Some(true));
        assert!(cookie.to_string().contains("; Secure"));
    }

    #[test]
    fn test_attach_then_clear() {
        let policy = SessionCookiePolicy::new(false);
        let jar = policy.attach(CookieJar::new(), &token());
        let jar = policy.clear(jar);
        let cookie = jar.get(SESSION_COOKIE_NAME).unwrap();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie
            .to_string()
            .contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert_eq!(SessionCookiePolicy::token_from(&jar), None);
    }

    #[test]
    fn test_clearing_cookie_matches_session_cookie_in_production() {
        let policy = SessionCookiePolicy::new(true);
        let session = policy.session_cookie(&token());
        let clearing = policy.clearing_cookie();

        assert_eq!(clearing.name(), session.name());
        assert_eq!(clearing.path(), session.path());
        assert_eq!(clearing.http_only(), session.http_only());
        assert_eq!(clearing.same_site(), session.same_site());
        assert_eq!(clearing.secure(), session.secure());
        assert_eq!(clearing.secure(), Some(true));
        assert!(clearing.to_string().contains("; Secure"));
    }
}
