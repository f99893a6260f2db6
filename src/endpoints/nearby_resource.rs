use actix_web::{get, web, HttpResponse};
use serde_derive::Deserialize;

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::error::RecommendError;

#[derive(Debug, Deserialize)]
pub struct NearbyQueryParams {
    location: String,
    radius_km: Option<u32>,
}

#[get("/v1/nearby")]
pub async fn v1_nearby(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<NearbyQueryParams>,
) -> Result<HttpResponse, RecommendError> {
    let radius_km = query.radius_km.unwrap_or(data.default_radius_km);
    let hits = data.distances.nearby(&query.location, radius_km)?;
    if hits.is_empty() {
        log::debug!(
            "no property within {} km of '{}'",
            radius_km,
            query.location
        );
    }
    Ok(HttpResponse::Ok().json(hits))
}

#[get("/v1/locations")]
pub async fn v1_locations(data: web::Data<SharedHandlesAndConfig>) -> HttpResponse {
    HttpResponse::Ok().json(data.distances.locations())
}

#[cfg(test)]
mod nearby_resource_test {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    use super::*;
    use crate::dataframeutils::fixtures::shared_handles;

    #[actix_rt::test]
    async fn should_serve_nearby_properties() {
        let mut app = test::init_service(
            App::new()
                .data(shared_handles())
                .service(v1_nearby)
                .service(v1_locations),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v1/nearby?location=IFFCO%20Chowk&radius_km=4")
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(StatusCode::OK, resp.status());
        let body: serde_json::Value = test::read_body_json(resp).await;
        let hits = body.as_array().unwrap();
        assert_eq!(2, hits.len());
        assert_eq!("C : 1 kms", hits[0]["label"]);
        assert_eq!("B", hits[1]["property"]);

        let req = test::TestRequest::get().uri("/v1/locations").to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&mut app, req).await).await;
        assert_eq!(serde_json::json!(["IFFCO Chowk", "Sector 45"]), body);
    }

    #[actix_rt::test]
    async fn should_reject_unknown_location_and_bad_radius() {
        let mut app =
            test::init_service(App::new().data(shared_handles()).service(v1_nearby)).await;

        let req = test::TestRequest::get()
            .uri("/v1/nearby?location=Atlantis")
            .to_request();
        assert_eq!(
            StatusCode::NOT_FOUND,
            test::call_service(&mut app, req).await.status()
        );

        let req = test::TestRequest::get()
            .uri("/v1/nearby?location=Sector%2045&radius_km=5000")
            .to_request();
        assert_eq!(
            StatusCode::BAD_REQUEST,
            test::call_service(&mut app, req).await.status()
        );
    }
}
