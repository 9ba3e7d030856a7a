//! Wire types shared by the server and the client.
//!
//! Every POST operation has a request and a response envelope. Responses
//! carry an optional `error` code; the server leaves it out on success and
//! clients treat a populated code as a failure.

use serde::{Deserialize, Serialize};

/// A redirect record: `name` is the unique key, `to` the destination.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub to: String,
}

impl Record {
    pub fn new(name: impl Into<String>, to: impl Into<String>) -> Self {
        Self { name: name.into(), to: to.into() }
    }
}

/// Closed set of failure kinds that may appear in a response envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    ReadFailure,
    WriteFailure,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not_found",
            ErrorCode::ReadFailure => "read_failure",
            ErrorCode::WriteFailure => "write_failure",
            ErrorCode::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every response envelope so clients can inspect the code
/// generically.
pub trait Envelope {
    fn error(&self) -> Option<ErrorCode>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScanRequest {}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScanResponse {
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GetRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PutRequest {
    pub record: Record,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PutResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    #[serde(default)]
    pub name: String,
}

/// The server answers a successful delete with an empty body; this envelope
/// only exists so a non-empty body can still be checked for a code.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeleteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

impl Envelope for ScanResponse {
    fn error(&self) -> Option<ErrorCode> { self.error }
}

impl Envelope for GetResponse {
    fn error(&self) -> Option<ErrorCode> { self.error }
}

impl Envelope for PutResponse {
    fn error(&self) -> Option<ErrorCode> { self.error }
}

impl Envelope for DeleteResponse {
    fn error(&self) -> Option<ErrorCode> { self.error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error() {
        let res = GetResponse { record: Some(Record::new("x", "https://example.com")), error: None };
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v, json!({"record": {"name": "x", "to": "https://example.com"}}));
    }

    #[test]
    fn error_code_is_snake_case() {
        let res = DeleteResponse { error: Some(ErrorCode::NotFound) };
        assert_eq!(serde_json::to_string(&res).unwrap(), r#"{"error":"not_found"}"#);
        assert_eq!(ErrorCode::WriteFailure.to_string(), "write_failure");
    }

    #[test]
    fn scan_request_accepts_empty_object_and_extra_fields() {
        let _: ScanRequest = serde_json::from_str("{}").unwrap();
        let _: ScanRequest = serde_json::from_str(r#"{"limit": 3}"#).unwrap();
        assert!(serde_json::from_str::<ScanRequest>("").is_err());
    }

    #[test]
    fn put_request_requires_record() {
        assert!(serde_json::from_str::<PutRequest>("{}").is_err());
        let req: PutRequest =
            serde_json::from_value(json!({"record": {"name": "a", "to": "b"}})).unwrap();
        assert_eq!(req.record, Record::new("a", "b"));
    }

    #[test]
    fn missing_name_and_to_default_to_empty() {
        let req: GetRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.name, "");
        let req: DeleteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.name, "");
        let req: PutRequest = serde_json::from_str(r#"{"record":{"name":"y"}}"#).unwrap();
        assert_eq!(req.record, Record::new("y", ""));
        assert!(serde_json::from_str::<PutRequest>(r#"{"record":{"to":"z"}}"#).is_err());
    }

    #[test]
    fn unknown_error_code_is_rejected() {
        assert!(serde_json::from_str::<ScanResponse>(r#"{"records":[],"error":"boom"}"#).is_err());
    }
}
