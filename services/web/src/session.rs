//! Session cookies
//!
//! The token lives in an `HttpOnly` cookie so page scripts cannot read it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const SESSION_COOKIE: &str = "session_token";
pub const USER_COOKIE: &str = "username";

fn session_cookie(name: &'static str, value: String, max_age: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(secure)
        .max_age(time::Duration::seconds(i64::try_from(max_age).unwrap_or(i64::MAX)))
        .build()
}

/// Store the session token and the signed-in username
pub fn start(jar: CookieJar, token: String, username: &str, max_age: u64, secure: bool) -> CookieJar {
    jar.add(session_cookie(SESSION_COOKIE, token, max_age, secure))
        .add(session_cookie(USER_COOKIE, username.to_string(), max_age, secure))
}

/// Drop both session cookies
pub fn end(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"))
        .remove(Cookie::build((USER_COOKIE, "")).path("/"))
}

/// Session token, if any
pub fn token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Signed-in username, if any
pub fn username(jar: &CookieJar) -> Option<String> {
    jar.get(USER_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookies_are_http_only() {
        let jar = start(CookieJar::new(), "tok-123".to_string(), "alice", 3600, true);

        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.value(), "tok-123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));

        assert_eq!(token(&jar).as_deref(), Some("tok-123"));
        assert_eq!(username(&jar).as_deref(), Some("alice"));
    }

    #[test]
    fn test_end_clears_session() {
        let jar = start(CookieJar::new(), "tok-123".to_string(), "alice", 3600, false);
        let jar = end(jar);

        assert_eq!(token(&jar), None);
        assert_eq!(username(&jar), None);
    }
}
