//! Name-to-id resolution through the search endpoints.
//!
//! Beer and brewery resolution take the first search hit as-is; Untappd's
//! ranking decides, there is no name comparison. Venue resolution scans every
//! hit for an exact street address match.

use serde_json::Value;
use tracing::warn;

use crate::client::UntappdClient;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::transport::Transport;
use crate::types::ListOptions;

pub struct Resolver<'a, T> {
    client: &'a UntappdClient<T>,
}

impl<'a, T: Transport> Resolver<'a, T> {
    pub(crate) fn new(client: &'a UntappdClient<T>) -> Self {
        Self { client }
    }

    /// Id of the first venue named like `name` whose address is exactly
    /// `address`.
    pub fn resolve_venue_id(&self, name: &str, address: &str) -> Result<String, ApiError> {
        let data = self
            .client
            .search()
            .venue_search(name, &ListOptions::default(), None)?;
        let items = data["response"]["venues"]["items"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default();

        items
            .iter()
            .map(|item| item.get("venue").unwrap_or(item))
            .find(|venue| venue_address(venue) == Some(address))
            .and_then(|venue| id_string(&venue["venue_id"]))
            .ok_or_else(|| {
                warn!(candidates = items.len(), "no venue matched the requested address");
                ApiError::NotFound {
                    entity: "venue",
                    name: format!("{name} at {address}"),
                }
            })
    }

    /// Id of the top beer search hit for `beer_name`, filtered to
    /// `brewery_name`.
    pub fn resolve_beer_id(&self, beer_name: &str, brewery_name: &str) -> Result<String, ApiError> {
        let fields = QueryParams::new().with("brewery_name", brewery_name);
        let data = self
            .client
            .search()
            .beer_search(beer_name, &ListOptions::default(), Some(&fields))?;
        first_id(&data["response"]["beers"]["items"], "beer", "bid").ok_or_else(|| {
            warn!("beer search returned no results");
            ApiError::NotFound {
                entity: "beer",
                name: format!("{beer_name} by {brewery_name}"),
            }
        })
    }

    /// Id of the top brewery search hit for `brewery_name`.
    pub fn resolve_brewery_id(&self, brewery_name: &str) -> Result<String, ApiError> {
        let data = self
            .client
            .search()
            .brewery_search(brewery_name, &ListOptions::default(), None)?;
        first_id(&data["response"]["brewery"]["items"], "brewery", "brewery_id").ok_or_else(|| {
            warn!("brewery search returned no results");
            ApiError::NotFound {
                entity: "brewery",
                name: brewery_name.to_string(),
            }
        })
    }
}

fn venue_address(venue: &Value) -> Option<&str> {
    venue["venue_address"]
        .as_str()
        .or_else(|| venue["location"]["venue_address"].as_str())
}

fn first_id(items: &Value, wrapper: &str, key: &str) -> Option<String> {
    id_string(&items.get(0)?[wrapper][key])
}

// Untappd sends ids as numbers on some endpoints and strings on others.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, FakeTransport};

    const VENUES: &str = r#"{"response":{"venues":{"count":3,"items":[
        {"venue_id":"101","venue_name":"Name","venue_address":"9 Side St"},
        {"venue_id":"202","venue_name":"Name","venue_address":"123 Main St"},
        {"venue_id":"303","venue_name":"Name","venue_address":"123 Main St"}
    ]}}}"#;

    #[test]
    fn venue_resolves_to_first_exact_address_match() {
        let fake = FakeTransport::new().respond(200, VENUES);
        let id = client(&fake)
            .resolver()
            .resolve_venue_id("Name", "123 Main St")
            .unwrap();
        assert_eq!(id, "202");
        assert!(fake.single_url().contains("search/venue?"));
    }

    #[test]
    fn venue_address_may_be_nested_under_location() {
        let body = r#"{"response":{"venues":{"items":[
            {"venue":{"venue_id":7,"location":{"venue_address":"320 Rehoboth Ave"}}}
        ]}}}"#;
        let fake = FakeTransport::new().respond(200, body);
        let id = client(&fake)
            .resolver()
            .resolve_venue_id("Brewings", "320 Rehoboth Ave")
            .unwrap();
        assert_eq!(id, "7");
    }

    #[test]
    fn venue_without_matching_address_is_not_found() {
        let fake = FakeTransport::new().respond(200, VENUES);
        let err = client(&fake)
            .resolver()
            .resolve_venue_id("Name", "123 Main Street")
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "venue", .. }));
    }

    #[test]
    fn venue_search_error_payload_is_not_found() {
        let body = r#"{"meta":{"code":500,"error_type":"invalid_auth"},"response":[]}"#;
        let fake = FakeTransport::new().respond(500, body);
        let err = client(&fake)
            .resolver()
            .resolve_venue_id("Name", "123 Main St")
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn brewery_resolves_to_first_result() {
        let body = r#"{"response":{"brewery":{"items":[{"brewery":{"brewery_id":"5331"}}]}}}"#;
        let fake = FakeTransport::new().respond(200, body);
        let id = client(&fake)
            .resolver()
            .resolve_brewery_id("Dogfish Head")
            .unwrap();
        assert_eq!(id, "5331");
        assert!(fake.single_url().ends_with("q=Dogfish+Head"));
    }

    #[test]
    fn brewery_with_no_results_is_not_found() {
        let body = r#"{"response":{"brewery":{"count":0,"items":[]}}}"#;
        let fake = FakeTransport::new().respond(200, body);
        let err = client(&fake)
            .resolver()
            .resolve_brewery_id("Nobody Brewing")
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "brewery", .. }));
    }

    #[test]
    fn beer_resolves_to_first_result_and_filters_by_brewery() {
        let body = r#"{"response":{"beers":{"items":[
            {"beer":{"bid":4499,"beer_name":"60 Minute IPA"}},
            {"beer":{"bid":8037,"beer_name":"90 Minute IPA"}}
        ]}}}"#;
        let fake = FakeTransport::new().respond(200, body);
        let id = client(&fake)
            .resolver()
            .resolve_beer_id("Minute IPA", "Dogfish Head")
            .unwrap();
        assert_eq!(id, "4499");
        let url = fake.single_url();
        assert!(url.contains("search/beer?"));
        assert!(url.contains("q=Minute+IPA"));
        assert!(url.contains("brewery_name=Dogfish+Head"));
    }

    #[test]
    fn search_transport_failure_propagates() {
        let fake = FakeTransport::new().fail("timed out");
        let err = client(&fake)
            .resolver()
            .resolve_beer_id("60 Minute IPA", "Dogfish Head")
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
