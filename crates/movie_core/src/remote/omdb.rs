//! OMDb (`www.omdbapi.com`) client.
//!
//! The API key travels as a query parameter built by `reqwest`, never by
//! string concatenation.

use crate::remote::{
    parse_year, MetadataSource, RatingSource, RemoteError, RemoteMovie, RemoteResult,
};
use log::{info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
}

/// Blocking OMDb client with a bounded request timeout.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> RemoteResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

impl MetadataSource for OmdbClient {
    fn fetch_movie(&self, title: &str) -> RemoteResult<Option<RemoteMovie>> {
        let started_at = Instant::now();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .map_err(|err| {
                warn!(
                    "event=omdb_fetch module=remote status=error duration_ms={} error_code=transport error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                RemoteError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<OmdbResponse>()
                .ok()
                .and_then(|body| body.error);
            warn!(
                "event=omdb_fetch module=remote status=error duration_ms={} error_code=http_status http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(RemoteError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let body = response.json::<OmdbResponse>()?;
        let movie = into_remote_movie(body)?;
        info!(
            "event=omdb_fetch module=remote status=ok duration_ms={} found={}",
            started_at.elapsed().as_millis(),
            movie.is_some()
        );
        Ok(movie)
    }
}

fn into_remote_movie(body: OmdbResponse) -> RemoteResult<Option<RemoteMovie>> {
    if !body.response.eq_ignore_ascii_case("true") {
        return Ok(None);
    }

    let title = body
        .title
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| RemoteError::Decode("response has no `Title`".to_string()))?;

    Ok(Some(RemoteMovie {
        title,
        year: body.year.as_deref().and_then(parse_year),
        ratings: body
            .ratings
            .into_iter()
            .map(|rating| RatingSource {
                source: rating.source,
                value: rating.value,
            })
            .collect(),
        poster_url: body.poster.filter(|poster| poster != NOT_AVAILABLE),
    }))
}
