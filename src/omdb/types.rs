use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESPONSE_FALSE: &str = "False";

/// The `{"Response": ..., "Error": ...}` wrapper OMDb puts around every reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            response: Some(RESPONSE_FALSE.to_string()),
            error: Some(message.into()),
        }
    }

}

/// The failure envelope for an upstream reply whose `Response` is the string
/// `"False"`, or `None` for anything else. A missing, empty or non-string
/// `Error` is replaced by `fallback`.
pub fn upstream_failure(reply: &Value, fallback: &str) -> Option<Envelope> {
    if reply.get("Response").and_then(Value::as_str) != Some(RESPONSE_FALSE) {
        return None;
    }
    let message = reply
        .get("Error")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .unwrap_or(fallback);
    Some(Envelope::failure(message))
}

/// `?s=` search reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// `?i=` details reply. OMDb uses `"N/A"` for missing values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetails {
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub rated: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub item_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Treats OMDb's `"N/A"` marker as absent.
pub fn known(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| *v != "N/A" && !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_failure_json() {
        let json = serde_json::to_string(&Envelope::failure("Movie not found!")).unwrap();
        assert_eq!(json, r#"{"Response":"False","Error":"Movie not found!"}"#);
    }

    #[test]
    fn test_upstream_failure() {
        let reply = serde_json::json!({"Response": "False", "Error": "Too many results."});
        assert_eq!(
            upstream_failure(&reply, "No movies found"),
            Some(Envelope::failure("Too many results."))
        );

        let reply = serde_json::json!({"Response": "False", "Error": ""});
        assert_eq!(
            upstream_failure(&reply, "No movies found"),
            Some(Envelope::failure("No movies found"))
        );

        let reply = serde_json::json!({"Response": "False", "Error": ["x"]});
        assert_eq!(
            upstream_failure(&reply, "Movie not found"),
            Some(Envelope::failure("Movie not found"))
        );
    }

    #[test]
    fn test_upstream_success_is_not_failure() {
        for reply in [
            serde_json::json!({"Title": "Heat", "Response": "True", "imdbID": "tt0113277"}),
            serde_json::json!({"Response": false, "Error": "x"}),
            serde_json::json!({"Response": "false"}),
            serde_json::json!("False"),
        ] {
            assert_eq!(upstream_failure(&reply, "fallback"), None);
        }
    }

    #[test]
    fn test_search_page() {
        let body = r#"{"Search":[{"Title":"Alien","Year":"1979","imdbID":"tt0078748","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#;
        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.search.len(), 1);
        assert_eq!(page.search[0].imdb_id, "tt0078748");
        assert_eq!(page.total_results.as_deref(), Some("1"));
        assert_eq!(known(&page.search[0].poster), None);
        assert_eq!(known(&page.search[0].year), Some("1979"));
    }

    #[test]
    fn test_movie_details_ratings() {
        let body = r#"{"Title":"Alien","Year":"1979","Genre":"Horror, Sci-Fi","Ratings":[{"Source":"Internet Movie Database","Value":"8.5/10"}],"imdbRating":"8.5","imdbVotes":"950,000","imdbID":"tt0078748","Response":"True"}"#;
        let details: MovieDetails = serde_json::from_str(body).unwrap();
        assert_eq!(details.title, "Alien");
        assert_eq!(details.ratings[0].value, "8.5/10");
        assert_eq!(known(&details.imdb_rating), Some("8.5"));
        assert_eq!(known(&details.plot), None);
    }
}
