extern crate estate_recommender;

use actix_web::http::header;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use actix_web_prom::PrometheusMetrics;
use anyhow::Context;
use log::info;

use estate_recommender::config::AppConfig;
use estate_recommender::dataframeutils::load_shared_handles;
use estate_recommender::endpoints::index_resource::internal;
use estate_recommender::endpoints::nearby_resource::{v1_locations, v1_nearby};
use estate_recommender::endpoints::recommend_resource::{recommendations_page, v1_recommend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(&config_path).context("reading configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log.level))
        .init();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let handles_and_config =
        load_shared_handles(&config).context("loading recommendation artifacts")?;

    info!("start metrics");
    let prometheus = PrometheusMetrics::new("api", Some("/internal/prometheus"), None);

    info!("Done. start httpd at http://{}", &bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(prometheus.clone())
            .wrap(
                middleware::DefaultHeaders::new()
                    .header("Cache-Control", "no-cache, no-store, must-revalidate")
                    .header("Pragma", "no-cache")
                    .header("Expires", "0"),
            )
            .data(handles_and_config.clone())
            .service(v1_recommend)
            .service(recommendations_page)
            .service(v1_nearby)
            .service(v1_locations)
            .service(internal)
            .service(web::resource("/").route(web::get().to(|_req: HttpRequest| {
                HttpResponse::Found()
                    .header(header::LOCATION, "/internal")
                    .finish()
            })))
    })
    .workers(config.server.num_workers)
    .bind(&bind_address)
    .with_context(|| format!("Could not bind server to address {}", &bind_address))?
    .run()
    .await?;

    Ok(())
}
