pub mod bid;
pub mod errors;
pub mod health;
pub mod home;
pub mod job;
pub mod payload;
pub mod state;


use actix_web::{web, Resource};

use crate::auth::{AccessPolicy, OwnershipField};

/// A resource whose handlers are all governed by `policy`
fn resource(path: &str, policy: AccessPolicy) -> Resource {
    web::resource(path).app_data(web::Data::new(policy))
}

/// Route table. Each resource declares its access policy here; handlers
/// receive it through the `Access` extractor.
pub fn routes_config(config: &mut web::ServiceConfig) {
    config
        .service(home::welcome)
        .service(
            resource("/jobs", AccessPolicy::PUBLIC)
                .route(web::get().to(job::handlers::list_jobs))
                .route(web::post().to(job::handlers::create_job)),
        )
        .service(
            resource("/jobs/{id}", AccessPolicy::PUBLIC)
                .route(web::get().to(job::handlers::get_job))
                .route(web::put().to(job::handlers::update_job))
                .route(web::delete().to(job::handlers::delete_job)),
        )
        .service(
            resource("/my-posted-jobs", AccessPolicy::owned_by(OwnershipField::JobBuyer))
                .route(web::get().to(job::handlers::list_posted_jobs)),
        )
        .service(
            resource("/bids", AccessPolicy::PUBLIC)
                .route(web::post().to(bid::handlers::create_bid)),
        )
        .service(
            resource("/my-bids", AccessPolicy::owned_by(OwnershipField::Bidder))
                .route(web::get().to(bid::handlers::list_owned_bids)),
        )
        .service(
            resource("/bid-requests", AccessPolicy::owned_by(OwnershipField::BidRecipient))
                .route(web::get().to(bid::handlers::list_owned_bids)),
        )
        .service(
            resource("/bid-status/{id}", AccessPolicy::PUBLIC)
                .route(web::patch().to(bid::handlers::update_bid_status)),
        );
}
