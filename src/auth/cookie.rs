use actix_web::cookie::{time::Duration, Cookie, SameSite};

use super::token::CREDENTIAL_TTL_DAYS;
use crate::config::Environment;

/// Name of the cookie carrying the credential
pub const TOKEN_COOKIE: &str = "token";

/// Attributes for the credential cookie.
///
/// Local development runs same-site over plain HTTP; production serves a
/// frontend on another origin, which needs `Secure` + `SameSite=None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieSettings {
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self {
                secure: true,
                same_site: SameSite::None,
            },
            Environment::Development => Self {
                secure: false,
                same_site: SameSite::Strict,
            },
        }
    }

    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(max_age)
            .finish()
    }

    /// Cookie carrying a freshly issued token
    pub fn issue(&self, token: String) -> Cookie<'static> {
        self.build(token, Duration::days(CREDENTIAL_TTL_DAYS))
    }

    /// Cookie that makes the browser drop the credential immediately
    pub fn revoke(&self) -> Cookie<'static> {
        self.build(String::new(), Duration::ZERO)
    }
}
