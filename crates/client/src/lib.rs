//! Typed client for the redirect store HTTP protocol.
//!
//! Each call posts one JSON envelope and maps the reply back to a typed
//! result. NotFound, transport failures and other server failures stay
//! distinct. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use common::{
    paths,
    types::{
        DeleteRequest, DeleteResponse, Envelope, GetRequest, GetResponse, PutRequest, PutResponse,
        Record, ScanRequest, ScanResponse,
    },
};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

pub mod errors;

pub use errors::ClientError;

/// The five operations exposed to command-line and provider callers.
#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn status(&self) -> Result<(), ClientError>;
    async fn scan(&self) -> Result<Vec<Record>, ClientError>;
    async fn get(&self, name: &str) -> Result<Record, ClientError>;
    async fn put(&self, record: Record) -> Result<Record, ClientError>;
    async fn delete(&self, name: &str) -> Result<(), ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpRecordClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpRecordClient {
    /// Build a client for `endpoint` (e.g. `http://127.0.0.1:8030`) with a
    /// per-request timeout. Redirects are not followed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(endpoint, http))
    }

    pub fn with_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { endpoint, http }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// POST an envelope and return the raw 200 body; other statuses become errors.
    async fn post_raw<Req: Serialize + Sync>(&self, path: &str, req: &Req) -> Result<Vec<u8>, ClientError> {
        let url = self.api(path);
        let resp = self.http.post(&url).json(req).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(%url, status = status.as_u16(), len = body.len(), "response");
        match status {
            StatusCode::OK => Ok(body.to_vec()),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            other => Err(ClientError::Server { status: other.as_u16() }),
        }
    }

    async fn post<Req, Res>(&self, path: &str, req: &Req) -> Result<Res, ClientError>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned + Envelope,
    {
        let body = self.post_raw(path, req).await?;
        let res: Res = serde_json::from_slice(&body)?;
        check(&res)?;
        Ok(res)
    }
}

fn check<E: Envelope>(res: &E) -> Result<(), ClientError> {
    match res.error() {
        Some(code) => Err(code.into()),
        None => Ok(()),
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn status(&self) -> Result<(), ClientError> {
        let resp = self.http.get(self.api(paths::STATUS)).send().await?;
        match resp.status() {
            StatusCode::OK => Ok(()),
            other => Err(ClientError::Server { status: other.as_u16() }),
        }
    }

    async fn scan(&self) -> Result<Vec<Record>, ClientError> {
        let res: ScanResponse = self.post(paths::SCAN, &ScanRequest {}).await?;
        Ok(res.records)
    }

    async fn get(&self, name: &str) -> Result<Record, ClientError> {
        let req = GetRequest { name: name.to_string() };
        let res: GetResponse = self.post(paths::GET, &req).await?;
        res.record.ok_or(ClientError::Incomplete("record"))
    }

    async fn put(&self, record: Record) -> Result<Record, ClientError> {
        let res: PutResponse = self.post(paths::PUT, &PutRequest { record }).await?;
        res.record.ok_or(ClientError::Incomplete("record"))
    }

    async fn delete(&self, name: &str) -> Result<(), ClientError> {
        let req = DeleteRequest { name: name.to_string() };
        let body = self.post_raw(paths::DELETE, &req).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let res: DeleteResponse = serde_json::from_slice(&body)?;
        check(&res)
    }
}
