//! Solr submission client
//!
//! Submits one document at a time: an add-document call followed by a commit
//! so the record is visible as soon as the call returns. Failures are
//! reported per record; the caller decides whether to continue.

use crate::transform::SolrDocument;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the search backend boundary. Never propagated past the
/// per-record submission; the pipeline records the message and moves on.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request to search backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search backend returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Thin client over the Solr update API.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolrClient {
    /// Create a client for the given Solr core URL
    /// (e.g. `http://localhost:8983/solr/geoblacklight`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Submit one document: add, then commit.
    pub async fn submit(&self, doc: &SolrDocument) -> Result<(), SubmitError> {
        self.add(doc).await?;
        self.commit().await
    }

    /// Send the add-document call.
    async fn add(&self, doc: &SolrDocument) -> Result<(), SubmitError> {
        let url = format!("{}/update/json/docs", self.base_url);
        debug!(url = %url, "Adding document");

        let response = self.http.post(&url).json(&doc.to_json()).send().await?;
        Self::check(response).await
    }

    /// Force a commit so the document becomes visible.
    async fn commit(&self) -> Result<(), SubmitError> {
        let url = format!("{}/update", self.base_url);
        debug!(url = %url, "Committing");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "commit": {} }))
            .send()
            .await?;
        Self::check(response).await
    }

    async fn check(response: reqwest::Response) -> Result<(), SubmitError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MetadataRecord;
    use crate::transform::transform;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn document() -> SolrDocument {
        transform(&MetadataRecord::from_pairs([
            ("dc_identifier_s", "https://example.edu/catalog/abc"),
            ("solr_geom", "10,20,30,40"),
            ("dc_title_s", "Some Map"),
        ]))
    }

    #[tokio::test]
    async fn test_submit_adds_then_commits() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/update/json/docs"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/update"))
            .and(body_json(serde_json::json!({ "commit": {} })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = SolrClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        client.submit(&document()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_document_carries_backend_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/update/json/docs"))
            .respond_with(ResponseTemplate::new(400).set_body_string("undefined field bogus"))
            .mount(&server)
            .await;

        let client = SolrClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.submit(&document()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("400"), "message: {message}");
        assert!(message.contains("undefined field bogus"), "message: {message}");
    }

    #[tokio::test]
    async fn test_failed_commit_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/update/json/docs"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(503).set_body_string("no leader"))
            .mount(&server)
            .await;

        let client = SolrClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert!(client.submit(&document()).await.is_err());
    }
}
