use actix_web::web;
use std::sync::Arc;

use super::{bid::BidService, errors, health::health_config, job::JobService, routes_config};
use crate::auth::{gateway_config, CookieSettings, TokenSigner};
use crate::db::DocumentStore;

/// Everything a worker's `App` needs, shared across workers
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    signer: web::Data<TokenSigner>,
    cookies: CookieSettings,
    max_payload_size: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        signer: TokenSigner,
        cookies: CookieSettings,
        max_payload_size: usize,
    ) -> Self {
        AppState {
            store,
            signer: web::Data::new(signer),
            cookies,
            max_payload_size,
        }
    }

    /// Register shared data and every route
    pub fn configure(&self, config: &mut web::ServiceConfig) {
        config
            .app_data(web::Data::from(self.store.clone()))
            .app_data(web::Data::new(JobService::new(self.store.clone())))
            .app_data(web::Data::new(BidService::new(self.store.clone())))
            .app_data(self.signer.clone())
            .app_data(web::Data::new(self.cookies))
            .app_data(web::PayloadConfig::default().limit(self.max_payload_size))
            .app_data(errors::json_config(self.max_payload_size))
            .configure(health_config)
            .configure(gateway_config)
            .configure(routes_config);
    }
}
