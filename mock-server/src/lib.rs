//! In-memory stand-in for the Untappd v4 API.
//!
//! Serves the subset of endpoints the client integration suite drives,
//! answers in Untappd's `{"meta": ..., "response": ...}` envelope and
//! enforces the same two authorization modes: an access token, or a
//! client id/secret pair on endpoints that allow it.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};

pub const CLIENT_ID: &str = "mock-client-id";
pub const CLIENT_SECRET: &str = "mock-client-secret";
pub const ACCESS_TOKEN: &str = "mock-access-token";
/// The user `ACCESS_TOKEN` belongs to.
pub const AUTHED_USER: &str = "hopper";

type Params = HashMap<String, String>;

#[derive(Clone, Debug, Serialize)]
pub struct Brewery {
    pub brewery_id: u64,
    pub brewery_name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Beer {
    pub bid: u64,
    pub beer_name: String,
    pub beer_style: String,
    pub brewery_id: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Venue {
    pub venue_id: u64,
    pub venue_name: String,
    pub venue_address: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Comment {
    pub comment_id: u64,
    pub user_name: String,
    pub comment: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Checkin {
    pub checkin_id: u64,
    pub user_name: String,
    pub bid: u64,
    pub checkin_comment: String,
    pub rating_score: f64,
    pub comments: Vec<Comment>,
    pub toasted_by: Vec<String>,
}

#[derive(Debug)]
pub struct Store {
    pub breweries: Vec<Brewery>,
    pub beers: Vec<Beer>,
    pub venues: Vec<Venue>,
    pub checkins: HashMap<u64, Checkin>,
    pub wishlist: Vec<u64>,
    pub pending: Vec<String>,
    pub friends: Vec<String>,
    next_checkin_id: u64,
    next_comment_id: u64,
}

impl Store {
    /// A small fixed catalogue of breweries, beers and venues.
    pub fn seeded() -> Self {
        let brewery = |brewery_id, name: &str| Brewery {
            brewery_id,
            brewery_name: name.to_string(),
        };
        let beer = |bid, name: &str, style: &str, brewery_id| Beer {
            bid,
            beer_name: name.to_string(),
            beer_style: style.to_string(),
            brewery_id,
        };
        let venue = |venue_id, name: &str, address: &str| Venue {
            venue_id,
            venue_name: name.to_string(),
            venue_address: address.to_string(),
        };
        Self {
            breweries: vec![
                brewery(5331, "Dogfish Head Craft Brewery"),
                brewery(1142, "Russian River Brewing Company"),
            ],
            beers: vec![
                beer(4499, "60 Minute IPA", "IPA - American", 5331),
                beer(8037, "90 Minute IPA", "IPA - Imperial / Double", 5331),
                beer(3457, "Pliny the Elder", "IPA - Imperial / Double", 1142),
            ],
            venues: vec![
                venue(107565, "Dogfish Head Brewings & Eats", "320 Rehoboth Ave"),
                venue(9921, "Dogfish Head Tasting Room", "6 Cannery Village Center"),
            ],
            checkins: HashMap::new(),
            wishlist: Vec::new(),
            pending: vec!["maltster".to_string()],
            friends: Vec::new(),
            next_checkin_id: 1000,
            next_comment_id: 1,
        }
    }

    fn brewery(&self, brewery_id: u64) -> Option<&Brewery> {
        self.breweries.iter().find(|b| b.brewery_id == brewery_id)
    }

    fn beer(&self, bid: u64) -> Option<&Beer> {
        self.beers.iter().find(|b| b.bid == bid)
    }

    fn beer_json(&self, beer: &Beer) -> Value {
        json!({
            "beer": beer,
            "brewery": self.brewery(beer.brewery_id),
        })
    }

    fn checkin_json(&self, checkin: &Checkin) -> Value {
        json!({
            "checkin_id": checkin.checkin_id,
            "user": { "user_name": checkin.user_name },
            "beer": self.beer(checkin.bid),
            "checkin_comment": checkin.checkin_comment,
            "rating_score": checkin.rating_score,
            "comments": { "count": checkin.comments.len(), "items": checkin.comments },
            "toasts": { "count": checkin.toasted_by.len() },
        })
    }
}

pub type Db = Arc<RwLock<Store>>;

/// An Untappd-style error answer.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    error_type: &'static str,
    detail: String,
}

impl ApiFailure {
    fn new(status: StatusCode, error_type: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            error_type,
            detail: detail.into(),
        }
    }

    fn invalid_auth(detail: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_auth", detail)
    }

    fn invalid_param(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_param", detail)
    }

    fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "invalid_param", detail)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({
            "meta": {
                "code": self.status.as_u16(),
                "error_type": self.error_type,
                "error_detail": self.detail,
            },
            "response": [],
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiFailure>;

fn envelope(response: Value) -> ApiResult {
    Ok(Json(json!({ "meta": { "code": 200 }, "response": response })))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Token or client id/secret.
    App,
    /// Token only.
    User,
}

fn authorize(params: &Params, access: Access) -> Result<(), ApiFailure> {
    let token = params.get("access_token");
    let app = (params.get("client_id"), params.get("client_secret"));
    if token.is_some() && (app.0.is_some() || app.1.is_some()) {
        return Err(ApiFailure::invalid_param(
            "send either access_token or client_id/client_secret, not both",
        ));
    }
    if let Some(token) = token {
        return match token.as_str() {
            ACCESS_TOKEN => Ok(()),
            _ => Err(ApiFailure::invalid_auth("Invalid access token")),
        };
    }
    if access == Access::User {
        return Err(ApiFailure::invalid_auth("This endpoint requires an access token"));
    }
    match app {
        (Some(id), Some(secret)) if id == CLIENT_ID && secret == CLIENT_SECRET => Ok(()),
        _ => Err(ApiFailure::invalid_auth("Invalid client_id or client_secret")),
    }
}

fn required<'p>(params: &'p Params, key: &str) -> Result<&'p str, ApiFailure> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiFailure::invalid_param(format!("Missing parameter: {key}")))
}

fn numeric<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ApiFailure> {
    value
        .parse()
        .map_err(|_| ApiFailure::invalid_param(format!("{key} must be numeric")))
}

fn matches_query(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

fn is_compact(params: &Params) -> bool {
    params.get("compact").is_some_and(|v| v == "true")
}

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/v4/search/brewery", get(search_brewery))
        .route("/v4/search/beer", get(search_beer))
        .route("/v4/search/venue", get(search_venue))
        .route("/v4/brewery/info/{id}", get(brewery_info))
        .route("/v4/beer/info/{id}", get(beer_info))
        .route("/v4/venue/info/{id}", get(venue_info))
        .route("/v4/checkin/add", post(add_checkin))
        .route("/v4/checkin/view/{id}", get(view_checkin))
        .route("/v4/checkin/addcomment/{id}", post(add_comment))
        .route("/v4/checkin/deletecomment/{id}", post(delete_comment))
        .route("/v4/checkin/toast/{id}", post(toast))
        .route("/v4/user/wishlist/add", get(wishlist_add))
        .route("/v4/user/wishlist/delete", get(wishlist_delete))
        .route("/v4/user/wishlist/{username}", get(user_wishlist))
        .route("/v4/user/pending", get(pending_friends))
        .route("/v4/friend/{action}/{username}", post(friend_action))
        .layer(middleware::from_fn(log_request))
        .with_state(db)
}

// Logs the path only; the query string carries credentials.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    let status = response.status().as_u16();
    if response.status().is_success() {
        debug!(%method, path, status, "request handled");
    } else {
        warn!(%method, path, status, "request rejected");
    }
    response
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock Untappd API listening");
    }
    axum::serve(listener, app()).await
}

async fn search_brewery(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::App)?;
    let query = required(&params, "q")?;
    let store = db.read().await;
    let items: Vec<Value> = store
        .breweries
        .iter()
        .filter(|b| matches_query(&b.brewery_name, query))
        .map(|b| json!({ "brewery": b }))
        .collect();
    envelope(json!({
        "found": items.len(),
        "brewery": { "count": items.len(), "items": items },
    }))
}

async fn search_beer(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::App)?;
    let query = required(&params, "q")?;
    let brewery_filter = params.get("brewery_name");
    let store = db.read().await;
    let items: Vec<Value> = store
        .beers
        .iter()
        .filter(|beer| matches_query(&beer.beer_name, query))
        .filter(|beer| match brewery_filter {
            Some(filter) => store
                .brewery(beer.brewery_id)
                .is_some_and(|b| matches_query(&b.brewery_name, filter)),
            None => true,
        })
        .map(|beer| store.beer_json(beer))
        .collect();
    envelope(json!({
        "found": items.len(),
        "beers": { "count": items.len(), "items": items },
    }))
}

async fn search_venue(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::App)?;
    let query = required(&params, "q")?;
    let store = db.read().await;
    let items: Vec<Value> = store
        .venues
        .iter()
        .filter(|v| matches_query(&v.venue_name, query))
        .map(|v| {
            json!({
                "venue_id": v.venue_id,
                "venue_name": v.venue_name,
                "location": { "venue_address": v.venue_address },
            })
        })
        .collect();
    envelope(json!({ "venues": { "count": items.len(), "items": items } }))
}

async fn brewery_info(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::App)?;
    let id: u64 = numeric(&id, "brewery_id")?;
    let store = db.read().await;
    let brewery = store
        .brewery(id)
        .ok_or_else(|| ApiFailure::not_found("This brewery does not exist."))?;
    let mut body = json!({ "brewery": brewery });
    if !is_compact(&params) {
        let beers: Vec<&Beer> = store.beers.iter().filter(|b| b.brewery_id == id).collect();
        body["brewery"]["beer_list"] = json!({ "count": beers.len(), "items": beers });
    }
    envelope(body)
}

async fn beer_info(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::App)?;
    let bid: u64 = numeric(&id, "bid")?;
    let store = db.read().await;
    let beer = store
        .beer(bid)
        .ok_or_else(|| ApiFailure::not_found("This beer does not exist."))?;
    let mut body = json!({ "beer": beer });
    body["beer"]["brewery"] = json!(store.brewery(beer.brewery_id));
    if !is_compact(&params) {
        let checkins: Vec<Value> = store
            .checkins
            .values()
            .filter(|c| c.bid == bid)
            .map(|c| store.checkin_json(c))
            .collect();
        body["beer"]["checkins"] = json!({ "count": checkins.len(), "items": checkins });
    }
    envelope(body)
}

async fn venue_info(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::App)?;
    let id: u64 = numeric(&id, "venue_id")?;
    let store = db.read().await;
    let venue = store
        .venues
        .iter()
        .find(|v| v.venue_id == id)
        .ok_or_else(|| ApiFailure::not_found("This venue does not exist."))?;
    envelope(json!({ "venue": venue }))
}

async fn add_checkin(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::User)?;
    required(&params, "gmt_offset")?;
    required(&params, "timezone")?;
    let bid: u64 = numeric(required(&params, "bid")?, "bid")?;
    let shout = params.get("shout").cloned().unwrap_or_default();
    if shout.chars().count() > 256 {
        return Err(ApiFailure::invalid_param("Shout is too long"));
    }
    let rating_score = match params.get("rating") {
        Some(rating) => numeric::<f64>(rating, "rating")?,
        None => 0.0,
    };

    let mut store = db.write().await;
    if store.beer(bid).is_none() {
        return Err(ApiFailure::not_found("This beer does not exist."));
    }
    let checkin_id = store.next_checkin_id;
    store.next_checkin_id += 1;
    let checkin = Checkin {
        checkin_id,
        user_name: AUTHED_USER.to_string(),
        bid,
        checkin_comment: shout,
        rating_score,
        comments: Vec::new(),
        toasted_by: Vec::new(),
    };
    debug!(checkin_id, bid, "check-in created");
    let body = store.checkin_json(&checkin);
    store.checkins.insert(checkin_id, checkin);
    envelope(body)
}

async fn view_checkin(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::App)?;
    let id: u64 = numeric(&id, "checkin_id")?;
    let store = db.read().await;
    let checkin = store
        .checkins
        .get(&id)
        .ok_or_else(|| ApiFailure::not_found("This check-in does not exist."))?;
    envelope(json!({ "checkin": store.checkin_json(checkin) }))
}

async fn add_comment(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::User)?;
    let id: u64 = numeric(&id, "checkin_id")?;
    let text = required(&params, "comment")?;
    if text.chars().count() > 140 {
        return Err(ApiFailure::invalid_param("Comment is too long"));
    }
    let mut store = db.write().await;
    let comment_id = store.next_comment_id;
    let checkin = store
        .checkins
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("This check-in does not exist."))?;
    let comment = Comment {
        comment_id,
        user_name: AUTHED_USER.to_string(),
        comment: text.to_string(),
    };
    checkin.comments.push(comment.clone());
    let total = checkin.comments.len();
    store.next_comment_id += 1;
    envelope(json!({
        "result": "success",
        "comments": { "total_count": total, "items": [comment] },
    }))
}

async fn delete_comment(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::User)?;
    let comment_id: u64 = numeric(&id, "comment_id")?;
    let mut store = db.write().await;
    let removed = store.checkins.values_mut().any(|checkin| {
        let before = checkin.comments.len();
        checkin.comments.retain(|c| c.comment_id != comment_id);
        checkin.comments.len() != before
    });
    if !removed {
        return Err(ApiFailure::not_found("This comment does not exist."));
    }
    envelope(json!({ "result": "success" }))
}

async fn toast(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::User)?;
    let id: u64 = numeric(&id, "checkin_id")?;
    let mut store = db.write().await;
    let checkin = store
        .checkins
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("This check-in does not exist."))?;
    let like_type = if checkin.toasted_by.iter().any(|u| u == AUTHED_USER) {
        checkin.toasted_by.retain(|u| u != AUTHED_USER);
        "untoast"
    } else {
        checkin.toasted_by.push(AUTHED_USER.to_string());
        "toast"
    };
    envelope(json!({
        "result": "success",
        "like_type": like_type,
        "toasts": { "count": checkin.toasted_by.len() },
    }))
}

async fn wishlist_add(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::User)?;
    let bid: u64 = numeric(required(&params, "bid")?, "bid")?;
    let mut store = db.write().await;
    let beer = store
        .beer(bid)
        .cloned()
        .ok_or_else(|| ApiFailure::not_found("This beer does not exist."))?;
    if !store.wishlist.contains(&bid) {
        store.wishlist.push(bid);
    }
    envelope(json!({ "result": "success", "beer": store.beer_json(&beer) }))
}

async fn wishlist_delete(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::User)?;
    let bid: u64 = numeric(required(&params, "bid")?, "bid")?;
    let mut store = db.write().await;
    let before = store.wishlist.len();
    store.wishlist.retain(|b| *b != bid);
    if store.wishlist.len() == before {
        return Err(ApiFailure::invalid_param("This beer is not on your wishlist."));
    }
    envelope(json!({ "result": "success" }))
}

async fn user_wishlist(
    State(db): State<Db>,
    Path(username): Path<String>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::App)?;
    if username != AUTHED_USER {
        return Err(ApiFailure::not_found("This user does not exist."));
    }
    let store = db.read().await;
    let items: Vec<Value> = store
        .wishlist
        .iter()
        .filter_map(|bid| store.beer(*bid))
        .map(|beer| store.beer_json(beer))
        .collect();
    envelope(json!({ "beers": { "count": items.len(), "items": items } }))
}

async fn pending_friends(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    authorize(&params, Access::User)?;
    let store = db.read().await;
    let items: Vec<Value> = store
        .pending
        .iter()
        .map(|name| json!({ "user": { "user_name": name } }))
        .collect();
    envelope(json!({ "count": items.len(), "items": items }))
}

async fn friend_action(
    State(db): State<Db>,
    Path((action, username)): Path<(String, String)>,
    Query(params): Query<Params>,
) -> ApiResult {
    authorize(&params, Access::User)?;
    let mut store = db.write().await;
    let was_pending = store.pending.contains(&username);
    match action.as_str() {
        "accept" if was_pending => {
            store.pending.retain(|u| *u != username);
            store.friends.push(username.clone());
        }
        "reject" if was_pending => store.pending.retain(|u| *u != username),
        "accept" | "reject" => {
            return Err(ApiFailure::invalid_param("No pending request from this user."))
        }
        "remove" => {
            let before = store.friends.len();
            store.friends.retain(|u| *u != username);
            if store.friends.len() == before {
                return Err(ApiFailure::invalid_param("You are not friends with this user."));
            }
        }
        "request" => {}
        other => return Err(ApiFailure::not_found(format!("Unknown friend action: {other}"))),
    }
    envelope(json!({ "result": "success", "target_user": { "user_name": username } }))
}
