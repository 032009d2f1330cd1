use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use super::service::BidService;
use crate::auth::Access;

pub async fn create_bid(
    _access: Access,
    bids: web::Data<BidService>,
    body: web::Json<Map<String, Value>>,
) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(bids.create_bid(body.into_inner()).await?))
}

/// Serves both `/my-bids` and `/bid-requests`; the route's ownership field
/// decides which side of the bid is matched.
pub async fn list_owned_bids(
    access: Access,
    bids: web::Data<BidService>,
) -> actix_web::Result<HttpResponse> {
    let owner = access.owner()?;
    Ok(HttpResponse::Ok().json(bids.list_owned_bids(owner).await?))
}

pub async fn update_bid_status(
    _access: Access,
    bids: web::Data<BidService>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(bids.update_status(&id, body.into_inner()).await?))
}
