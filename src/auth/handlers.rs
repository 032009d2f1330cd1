use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::cookie::CookieSettings;
use super::error::AuthError;
use super::token::TokenSigner;

#[derive(Serialize)]
struct Acknowledgement {
    success: bool,
}

/// Sign whatever the client sent and hand it back as the `token` cookie.
///
/// The body is not validated: anything that is not a JSON object is signed
/// as an empty claim set.
#[post("/jwt")]
async fn issue_credential(
    signer: web::Data<TokenSigner>,
    cookies: web::Data<CookieSettings>,
    body: web::Bytes,
) -> Result<HttpResponse, AuthError> {
    let payload = serde_json::from_slice::<Map<String, Value>>(&body).unwrap_or_else(|e| {
        debug!("Credential request body is not a JSON object: {}", e);
        Map::new()
    });
    let email = payload.get("email").and_then(Value::as_str).unwrap_or("<no email>");
    info!("Issuing credential for {}", email);

    let token = signer.issue(payload)?;
    Ok(HttpResponse::Ok()
        .cookie(cookies.issue(token))
        .json(Acknowledgement { success: true }))
}

/// Clear the credential cookie. Tokens already handed out stay valid until
/// they expire.
#[get("/sign-out")]
async fn revoke_credential(cookies: web::Data<CookieSettings>) -> HttpResponse {
    info!("Clearing credential cookie");
    HttpResponse::Ok()
        .cookie(cookies.revoke())
        .json(Acknowledgement { success: true })
}

pub fn gateway_config(config: &mut web::ServiceConfig) {
    config.service(issue_credential).service(revoke_credential);
}
