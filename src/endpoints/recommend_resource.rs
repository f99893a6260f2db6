use actix_web::{get, web, HttpResponse};
use serde_derive::Deserialize;

use crate::catalog::escape_html;
use crate::dataframeutils::SharedHandlesAndConfig;
use crate::error::RecommendError;
use crate::similarity::{self, Recommendation};

#[derive(Debug, Deserialize)]
pub struct RecommendQueryParams {
    property: String,
    top_n: Option<usize>,
}

#[get("/v1/recommend")]
pub async fn v1_recommend(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<RecommendQueryParams>,
) -> Result<HttpResponse, RecommendError> {
    let top_n = query.top_n.unwrap_or(data.default_top_n);
    let recommendations =
        similarity::recommend(&data.composite, &data.catalog, &query.property, top_n)?;
    log::debug!(
        "recommended {} properties for '{}'",
        recommendations.len(),
        query.property
    );
    Ok(HttpResponse::Ok().json(recommendations))
}

// Same ranking as `/v1/recommend`, rendered as a page with clickable links.
#[get("/recommendations")]
pub async fn recommendations_page(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<RecommendQueryParams>,
) -> Result<HttpResponse, RecommendError> {
    let top_n = query.top_n.unwrap_or(data.default_top_n);
    let recommendations =
        similarity::recommend(&data.composite, &data.catalog, &query.property, top_n)?;
    let html = render_recommendation_table(&query.property, &recommendations);
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

pub fn render_recommendation_table(selected: &str, recommendations: &[Recommendation]) -> String {
    let mut html = "<html><head><style>".to_string();
    html.push_str("table { width: 100%; border-collapse: collapse; }");
    html.push_str("th, td { padding: 12px; text-align: left; border-bottom: 1px solid #444; }");
    html.push_str("th { background-color: #222; color: #fff; }");
    html.push_str("</style></head><body>");
    html.push_str("<p>You selected: <b>");
    html.push_str(&escape_html(selected));
    html.push_str("</b></p>");
    html.push_str("<h3>Top ");
    html.push_str(&recommendations.len().to_string());
    html.push_str(" Recommended Properties</h3>");
    html.push_str("<table><tr><th>Property Name</th><th>SimilarityScore</th><th>Link</th></tr>");
    for reco in recommendations {
        html.push_str("<tr><td>");
        html.push_str(&escape_html(&reco.property));
        html.push_str("</td><td>");
        html.push_str(&format!("{:.4}", reco.score));
        html.push_str("</td><td>");
        html.push_str(&reco.link.to_html_anchor());
        html.push_str("</td></tr>");
    }
    html.push_str("</table></body></html>");
    html
}
