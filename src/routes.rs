use crate::api::employee;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};
use std::sync::Arc;

pub type RateLimiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` requests with an equal burst.
pub fn build_limiter(requests_per_min: u32) -> Result<RateLimiter> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limiter settings")?;
    Ok(Governor::new(&cfg))
}

fn employee_resources(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/showList").route(web::get().to(employee::show_list)))
        // /employee/showPage?page=&name=
        .service(web::resource("/showPage").route(web::get().to(employee::show_page)))
        // /employee/showDetail?id=
        .service(web::resource("/showDetail").route(web::get().to(employee::show_detail)))
        .service(web::resource("/update").route(web::post().to(employee::update)))
        // /employee/search?name=
        .service(web::resource("/search").route(web::get().to(employee::search)))
        .service(web::resource("/insertForm").route(web::get().to(employee::insert_form)))
        .service(web::resource("/insert").route(web::post().to(employee::insert)));
}

/// `/employee` routes without rate limiting.
pub fn employee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/employee").configure(employee_resources));
}

pub fn configure(cfg: &mut web::ServiceConfig, limiter: Arc<RateLimiter>) {
    cfg.service(
        web::scope("/employee")
            .wrap(limiter) // rate limiting
            .configure(employee_resources),
    );
}
