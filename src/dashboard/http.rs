use super::source::{ChangeStream, RequestSource, SourceError};
use super::sse::SseDecoder;
use crate::modules::request::feed::Change;
use crate::modules::request::repository::Request;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::time::Duration;

const CHANGE_EVENT: &str = "change";

/// Which side of the API the dashboard talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// One restaurant, authenticated with its panel token.
    Panel,
    /// Every restaurant, authenticated with the admin token.
    Admin,
}

impl Audience {
    fn prefix(&self) -> &'static str {
        match self {
            Audience::Panel => "panel",
            Audience::Admin => "admin",
        }
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    stream_client: reqwest::Client,
    base_url: String,
    token: String,
    audience: Audience,
}

impl HttpSource {
    pub fn new(
        base_url: String,
        token: String,
        audience: Audience,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SourceError::Transient(err.to_string()))?;
        // the push channel is long-lived, only its handshake is bounded
        let stream_client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|err| SourceError::Transient(err.to_string()))?;

        Ok(Self {
            client,
            stream_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            audience,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, self.audience.prefix(), path)
    }
}

fn transport_error(err: reqwest::Error) -> SourceError {
    tracing::warn!("Dashboard API call failed: {}", err);
    SourceError::Transient(err.to_string())
}

fn status_error(status: StatusCode) -> SourceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SourceError::Unauthorized,
        StatusCode::NOT_FOUND => SourceError::NotFound,
        status => SourceError::Transient(format!("unexpected response status {}", status)),
    }
}

fn decode_change(data: &str) -> Option<Change> {
    serde_json::from_str::<Change>(data)
        .map_err(|err| {
            tracing::warn!("Skipping malformed change payload: {}", err);
        })
        .ok()
}

#[async_trait]
impl RequestSource for HttpSource {
    async fn snapshot_open_requests(&self, limit: u32) -> Result<Vec<Request>, SourceError> {
        let res = self
            .client
            .get(self.url("requests/open"))
            .bearer_auth(&self.token)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(transport_error)?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }

        res.json::<Vec<Request>>().await.map_err(transport_error)
    }

    async fn complete_request(&self, id: &str) -> Result<(), SourceError> {
        let res = self
            .client
            .post(self.url(&format!("requests/{}/complete", id)))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport_error)?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }

        Ok(())
    }

    async fn subscribe_changes(&self) -> Result<ChangeStream, SourceError> {
        let res = self
            .stream_client
            .get(self.url("requests/changes"))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(transport_error)?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }

        let state = (
            res.bytes_stream().boxed(),
            SseDecoder::default(),
            VecDeque::new(),
            false,
        );

        let changes = stream::unfold(state, |(mut body, mut decoder, mut pending, done)| async move {
            loop {
                if let Some(change) = pending.pop_front() {
                    return Some((Ok(change), (body, decoder, pending, done)));
                }
                if done {
                    return None;
                }

                match body.next().await {
                    Some(Ok(chunk)) => pending.extend(
                        decoder
                            .push(&chunk)
                            .into_iter()
                            .filter(|event| event.event.as_deref().unwrap_or(CHANGE_EVENT) == CHANGE_EVENT)
                            .filter_map(|event| decode_change(&event.data)),
                    ),
                    Some(Err(err)) => {
                        return Some((Err(transport_error(err)), (body, decoder, pending, true)));
                    }
                    None => return None,
                }
            }
        });

        Ok(changes.boxed())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn urls_follow_the_audience() {
        let panel = HttpSource::new(
            "http://localhost:8000/".to_string(),
            "token".to_string(),
            Audience::Panel,
            Duration::from_secs(5),
        )
        .unwrap();
        let admin = HttpSource::new(
            "http://localhost:8000".to_string(),
            "token".to_string(),
            Audience::Admin,
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            panel.url("requests/open"),
            "http://localhost:8000/api/panel/requests/open"
        );
        assert_eq!(
            admin.url("requests/changes"),
            "http://localhost:8000/api/admin/requests/changes"
        );
    }

    #[test]
    fn statuses_map_to_source_errors() {
        assert_eq!(status_error(StatusCode::NOT_FOUND), SourceError::NotFound);
        assert_eq!(status_error(StatusCode::UNAUTHORIZED), SourceError::Unauthorized);
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY),
            SourceError::Transient(_)
        ));
    }

    #[test]
    fn malformed_payloads_are_skipped() {
        assert!(decode_change("{not json").is_none());
    }
}
