use std::net::SocketAddr;

use agency_core_contact_contracts::ContactFeatureService;
use agency_core_health_contracts::HealthFeatureService;
use agency_di::Build;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod messages;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Upper bound for the contact form request body, in characters.
    pub max_body_length: usize,
    /// Include the message of unexpected errors in 500 responses.
    pub expose_internal_errors: bool,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "listening");
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(
                self.contact,
                routes::contact::ContactRouteConfig {
                    max_body_length: self.config.max_body_length,
                    expose_internal_errors: self.config.expose_internal_errors,
                },
            ));

        // layers run outermost first: request id, client key, tracing, panics
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(router);
        middlewares::request_id::add(router)
    }
}
