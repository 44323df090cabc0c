use super::client::{GuestApi, ResolvedTable};
use super::Error;
use crate::modules::request::lifecycle::RequestType;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Deserialize)]
struct Created {
    id: String,
}

pub struct HttpGuestApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGuestApi {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Transient(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, token: &str, path: &str) -> String {
        format!("{}/api/tables/{}{}", self.base_url, token, path)
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    tracing::warn!("Guest API call failed: {}", err);
    Error::Transient(err.to_string())
}

fn status_error(status: StatusCode) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::Unavailable,
        StatusCode::BAD_REQUEST => Error::InvalidInput,
        status => Error::Transient(format!("unexpected response status {}", status)),
    }
}

#[async_trait]
impl GuestApi for HttpGuestApi {
    async fn resolve_table(&self, token: &str) -> Result<ResolvedTable, Error> {
        let res = self
            .client
            .get(self.url(token, ""))
            .send()
            .await
            .map_err(transport_error)?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }

        res.json::<ResolvedTable>().await.map_err(transport_error)
    }

    async fn create_request(&self, token: &str, request_type: RequestType) -> Result<String, Error> {
        let res = self
            .client
            .post(self.url(token, "/requests"))
            .json(&json!({ "type": request_type }))
            .send()
            .await
            .map_err(transport_error)?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }

        let created = res.json::<Created>().await.map_err(transport_error)?;
        Ok(created.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_urls_embed_the_token() {
        let api = HttpGuestApi::new("https://tablecall.test/".to_string(), Duration::from_secs(5)).unwrap();

        assert_eq!(api.url("abc", ""), "https://tablecall.test/api/tables/abc");
        assert_eq!(
            api.url("abc", "/requests"),
            "https://tablecall.test/api/tables/abc/requests"
        );
    }

    #[test]
    fn closed_tables_and_bad_input_are_not_transient() {
        assert_eq!(status_error(StatusCode::NOT_FOUND), Error::Unavailable);
        assert_eq!(status_error(StatusCode::BAD_REQUEST), Error::InvalidInput);
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR),
            Error::Transient(_)
        ));
    }
}
