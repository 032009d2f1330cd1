use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use serde::Deserialize;
use tracing::debug;

use super::cookie::TOKEN_COOKIE;
use super::error::AuthError;
use super::token::TokenSigner;
use crate::db::store::Filter;

/// Whether a route needs a verified credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    Required,
}

/// Document field that names the owner of identity-scoped data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipField {
    /// `buyer.email` on job postings
    JobBuyer,
    /// `email` on bids: the bidder
    Bidder,
    /// `buyerEmail` on bids: the poster being bid to
    BidRecipient,
}

impl OwnershipField {
    pub fn path(&self) -> &'static str {
        match self {
            OwnershipField::JobBuyer => "buyer.email",
            OwnershipField::Bidder => "email",
            OwnershipField::BidRecipient => "buyerEmail",
        }
    }
}

/// Access rule declared for a route and evaluated by [`Access`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub auth: AuthRequirement,
    pub ownership: Option<OwnershipField>,
}

impl AccessPolicy {
    pub const PUBLIC: AccessPolicy = AccessPolicy {
        auth: AuthRequirement::None,
        ownership: None,
    };

    /// Credential required, and its email must equal `?email=`
    pub const fn owned_by(field: OwnershipField) -> Self {
        AccessPolicy {
            auth: AuthRequirement::Required,
            ownership: Some(field),
        }
    }
}

/// Identity a request has been authorized to act as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub field: OwnershipField,
    pub email: String,
}

impl Owner {
    /// Store filter selecting documents this owner may see
    pub fn filter(&self) -> Filter {
        Filter::field_eq(self.field.path(), self.email.clone())
    }
}

#[derive(Deserialize)]
struct OwnerQuery {
    email: Option<String>,
}

/// Outcome of evaluating the route's [`AccessPolicy`].
///
/// Taking this as a handler argument runs the gateway before the handler:
/// a missing cookie or a bad token is a 401, an ownership mismatch a 403.
#[derive(Debug)]
pub struct Access {
    owner: Option<Owner>,
}

impl Access {
    /// The authorized owner; only present on routes with an ownership rule
    pub fn owner(&self) -> Result<&Owner, AuthError> {
        self.owner
            .as_ref()
            .ok_or(AuthError::Misconfigured("route has no ownership rule"))
    }

    fn evaluate(req: &HttpRequest) -> Result<Self, AuthError> {
        let policy = req
            .app_data::<web::Data<AccessPolicy>>()
            .map(|policy| *policy.get_ref())
            .ok_or(AuthError::Misconfigured("route has no access policy"))?;

        let authenticate = policy.auth == AuthRequirement::Required || policy.ownership.is_some();
        if !authenticate {
            return Ok(Access { owner: None });
        }

        let cookie = req.cookie(TOKEN_COOKIE).ok_or(AuthError::MissingToken)?;
        let signer = req
            .app_data::<web::Data<TokenSigner>>()
            .ok_or(AuthError::Misconfigured("no token signer registered"))?;
        let claims = signer.verify(cookie.value())?;
        debug!("Authenticated request for {:?}", claims.email());

        let owner = match policy.ownership {
            None => None,
            Some(field) => {
                let requested = web::Query::<OwnerQuery>::from_query(req.query_string())
                    .ok()
                    .and_then(|q| q.into_inner().email);
                match (claims.email(), requested) {
                    (Some(claimed), Some(requested)) if claimed == requested => Some(Owner {
                        field,
                        email: requested,
                    }),
                    _ => return Err(AuthError::Forbidden),
                }
            }
        };

        Ok(Access { owner })
    }
}

impl FromRequest for Access {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Access::evaluate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test::TestRequest, ResponseError};
    use serde_json::json;

    fn signer() -> TokenSigner {
        TokenSigner::new("secret")
    }

    fn token_for(email: &str) -> String {
        signer()
            .issue(json!({ "email": email }).as_object().cloned().unwrap())
            .unwrap()
    }

    fn request(policy: AccessPolicy, uri: &str, token: Option<String>) -> HttpRequest {
        let mut req = TestRequest::get()
            .uri(uri)
            .app_data(web::Data::new(policy))
            .app_data(web::Data::new(signer()));
        if let Some(token) = token {
            req = req.cookie(Cookie::new(TOKEN_COOKIE, token));
        }
        req.to_http_request()
    }

    #[test]
    fn public_route_ignores_credentials() {
        let req = request(AccessPolicy::PUBLIC, "/jobs", Some("garbage".into()));
        let access = Access::evaluate(&req).unwrap();
        assert!(matches!(access.owner(), Err(AuthError::Misconfigured(_))));
    }

    #[test]
    fn owned_route_without_cookie_is_unauthorized() {
        let policy = AccessPolicy::owned_by(OwnershipField::Bidder);
        let req = request(policy, "/my-bids?email=ada@example.com", None);
        assert!(matches!(Access::evaluate(&req), Err(AuthError::MissingToken)));
    }

    #[test]
    fn owned_route_with_bad_token_is_unauthorized() {
        let policy = AccessPolicy::owned_by(OwnershipField::Bidder);
        let req = request(policy, "/my-bids?email=ada@example.com", Some("garbage".into()));
        assert!(matches!(Access::evaluate(&req), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn mismatched_or_missing_email_is_forbidden() {
        let policy = AccessPolicy::owned_by(OwnershipField::JobBuyer);

        let req = request(policy, "/my-posted-jobs?email=bob@example.com", Some(token_for("ada@example.com")));
        assert!(matches!(Access::evaluate(&req), Err(AuthError::Forbidden)));

        let req = request(policy, "/my-posted-jobs", Some(token_for("ada@example.com")));
        assert!(matches!(Access::evaluate(&req), Err(AuthError::Forbidden)));
    }

    #[test]
    fn matching_email_yields_owner_filter() {
        let policy = AccessPolicy::owned_by(OwnershipField::BidRecipient);
        let req = request(policy, "/bid-requests?email=ada%40example.com", Some(token_for("ada@example.com")));

        let access = Access::evaluate(&req).unwrap();
        let owner = access.owner().unwrap();
        assert_eq!(owner.filter(), Filter::field_eq("buyerEmail", "ada@example.com"));
        assert_eq!(owner.email, "ada@example.com");
    }

    #[test]
    fn route_without_policy_fails_closed() {
        let req = TestRequest::get().uri("/jobs").to_http_request();
        assert!(matches!(Access::evaluate(&req), Err(AuthError::Misconfigured(_))));
    }

    #[test]
    fn missing_signer_is_a_server_error() {
        let policy = AccessPolicy::owned_by(OwnershipField::Bidder);
        let req = TestRequest::get()
            .uri("/my-bids?email=ada@example.com")
            .app_data(web::Data::new(policy))
            .cookie(Cookie::new(TOKEN_COOKIE, token_for("ada@example.com")))
            .to_http_request();

        // Credential present but no signer to check it with
        let err = Access::evaluate(&req).unwrap_err();
        assert!(matches!(err, AuthError::Misconfigured("no token signer registered")));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
