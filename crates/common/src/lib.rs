pub mod types;
pub mod utils;
pub mod env;

/// Fixed HTTP paths shared by the server router and the client.
pub mod paths {
    pub const STATUS: &str = "/status";
    pub const SCAN: &str = "/scan";
    pub const GET: &str = "/get";
    pub const PUT: &str = "/put";
    pub const DELETE: &str = "/delete";
    /// Prefix of the redirect front door; the record name follows it.
    pub const REDIRECT_PREFIX: &str = "/c/";
}

/// Plain-text body returned by the liveness check.
pub const STATUS_BODY: &str = "OK";

/// Plain-text body returned when a request envelope fails to decode.
pub const INVALID_REQUEST_BODY: &str = "Invalid request";
