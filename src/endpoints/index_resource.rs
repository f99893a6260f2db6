use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::dataframeutils::SharedHandlesAndConfig;
use web::Data;

#[get("/internal")]
pub async fn internal(config: Data<SharedHandlesAndConfig>) -> HttpResponse {
    let mut html =
        "<html>estate-recommender: nearby apartment recommendations.<br />".to_string();

    let stats = &config.artifact_stats;
    html.push_str("<h3>Artifacts</h3>");
    html.push_str("Qty properties in similarity index: ");
    html.push_str(&stats.qty_properties.to_string());
    html.push_str("<br />Qty listed properties: ");
    html.push_str(&stats.qty_listed_properties.to_string());
    html.push_str(" (");
    html.push_str(&stats.qty_listed_with_link.to_string());
    html.push_str(" with link)");
    html.push_str("<br />Qty search locations: ");
    html.push_str(&stats.qty_locations.to_string());
    html.push_str("<br />Loaded at: ");
    html.push_str(&stats.loaded_at.to_string());
    html.push_str(" (");
    html.push_str(&stats.load_duration_millis.to_string());
    html.push_str(" ms)");
    html.push_str("<br />Uptime (minutes): ");
    let uptime = (Utc::now().naive_utc() - stats.loaded_at).num_minutes();
    html.push_str(&uptime.to_string());

    html.push_str("<h3>Composite similarity</h3>");
    for signal in config.composite.signals() {
        html.push_str(&signal.name);
        html.push_str(" : weight ");
        html.push_str(&signal.weight.to_string());
        html.push_str("<br />");
    }
    html.push_str("Default qty recommendations: ");
    html.push_str(&config.default_top_n.to_string());
    html.push_str("<br />Default search radius (km): ");
    html.push_str(&config.default_radius_km.to_string());
    if let Some(example) = config.composite.keys().first() {
        html.push_str("<br /><a href=\"/recommendations?property=");
        html.push_str(&urlencoding::encode(example));
        html.push_str("\">recommendations for an example property</a>");
    }

    html.push_str("<h3>Machine instance</h3>");
    html.push_str("Qty CPU's detected: ");
    html.push_str(&sys_info::cpu_num().unwrap_or(0).to_string());
    html.push_str("<br />Qty actix workers set: ");
    html.push_str(&config.qty_workers.to_string());
    html.push_str("<h3>Metrics</h3>");
    html.push_str("<a href=\"/internal/prometheus\">prometheus</a>");
    html.push_str("</html>");

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
