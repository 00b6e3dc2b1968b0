use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ACCESS_TOKEN, CLIENT_ID, CLIENT_SECRET};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn post(uri: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn app_auth() -> String {
    format!("client_id={CLIENT_ID}&client_secret={CLIENT_SECRET}")
}

fn token_auth() -> String {
    format!("access_token={ACCESS_TOKEN}")
}

// --- search ---

#[tokio::test]
async fn brewery_search_with_app_credentials() {
    let resp = app()
        .oneshot(get(&format!("/v4/search/brewery?{}&q=dogfish", app_auth())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["code"], 200);
    assert_eq!(body["response"]["brewery"]["count"], 1);
    assert_eq!(
        body["response"]["brewery"]["items"][0]["brewery"]["brewery_id"],
        5331
    );
}

#[tokio::test]
async fn beer_search_filters_by_brewery_name() {
    let resp = app()
        .oneshot(get(&format!(
            "/v4/search/beer?{}&q=minute&brewery_name=Dogfish+Head",
            token_auth()
        )))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let items = body["response"]["beers"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["beer"]["bid"], 4499);
    assert_eq!(items[0]["brewery"]["brewery_name"], "Dogfish Head Craft Brewery");

    let resp = app()
        .oneshot(get(&format!(
            "/v4/search/beer?{}&q=minute&brewery_name=Russian+River",
            token_auth()
        )))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["response"]["beers"]["count"], 0);
}

#[tokio::test]
async fn venue_search_nests_address_under_location() {
    let resp = app()
        .oneshot(get(&format!("/v4/search/venue?{}&q=tasting", app_auth())))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let venue = &body["response"]["venues"]["items"][0];
    assert_eq!(venue["venue_id"], 9921);
    assert_eq!(venue["location"]["venue_address"], "6 Cannery Village Center");
}

#[tokio::test]
async fn search_without_query_is_invalid_param() {
    let resp = app()
        .oneshot(get(&format!("/v4/search/brewery?{}", app_auth())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["error_type"], "invalid_param");
}

// --- auth ---

#[tokio::test]
async fn missing_auth_is_401_with_meta() {
    let resp = app()
        .oneshot(get("/v4/beer/info/4499"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["code"], 401);
    assert_eq!(body["meta"]["error_type"], "invalid_auth");
}

#[tokio::test]
async fn user_endpoint_rejects_app_credentials() {
    let resp = app()
        .oneshot(get(&format!("/v4/user/pending?{}", app_auth())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- info ---

#[tokio::test]
async fn brewery_info_compact_drops_beer_list() {
    let full = body_json(
        app()
            .oneshot(get(&format!("/v4/brewery/info/5331?{}", app_auth())))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(full["response"]["brewery"]["beer_list"]["count"], 2);

    let compact = body_json(
        app()
            .oneshot(get(&format!("/v4/brewery/info/5331?{}&compact=true", app_auth())))
            .await
            .unwrap(),
    )
    .await;
    assert!(compact["response"]["brewery"].get("beer_list").is_none());
}

#[tokio::test]
async fn unknown_beer_is_404_payload() {
    let resp = app()
        .oneshot(get(&format!("/v4/beer/info/1?{}", token_auth())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["error_detail"], "This beer does not exist.");
}

// --- user actions ---

#[tokio::test]
async fn checkin_comment_toast_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(post(&format!(
            "/v4/checkin/add?{}&gmt_offset=-5&timezone=EST&bid=4499&shout=Crisp&rating=4.5",
            token_auth()
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    let checkin_id = created["response"]["checkin_id"].as_u64().unwrap();
    assert_eq!(created["response"]["rating_score"], 4.5);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(post(&format!(
            "/v4/checkin/addcomment/{checkin_id}?{}&comment=Cheers",
            token_auth()
        )))
        .await
        .unwrap();
    let commented = body_json(resp).await;
    assert_eq!(commented["response"]["comments"]["total_count"], 1);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(post(&format!("/v4/checkin/toast/{checkin_id}?{}", token_auth())))
        .await
        .unwrap();
    let toasted = body_json(resp).await;
    assert_eq!(toasted["response"]["like_type"], "toast");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/v4/checkin/view/{checkin_id}?{}", app_auth())))
        .await
        .unwrap();
    let viewed = body_json(resp).await;
    assert_eq!(viewed["response"]["checkin"]["checkin_comment"], "Crisp");
    assert_eq!(viewed["response"]["checkin"]["comments"]["count"], 1);
    assert_eq!(viewed["response"]["checkin"]["toasts"]["count"], 1);
}

#[tokio::test]
async fn checkin_requires_token() {
    let resp = app()
        .oneshot(post(&format!(
            "/v4/checkin/add?{}&gmt_offset=0&timezone=UTC&bid=4499",
            app_auth()
        )))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn accept_without_pending_request_fails() {
    let resp = app()
        .oneshot(post(&format!("/v4/friend/accept/stranger?{}", token_auth())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wishlist_delete_of_absent_beer_fails() {
    let resp = app()
        .oneshot(get(&format!("/v4/user/wishlist/delete?{}&bid=4499", token_auth())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
