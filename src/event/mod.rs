//! Request/response contract
//!
//! The gateway-agnostic shapes every handler consumes and produces: a
//! `RequestEvent` carrying query parameters, path parameters, and an
//! optional JSON body, and a `HandlerResponse` carrying a status code,
//! headers, and a JSON-encoded body.

mod request;
mod response;

pub use request::RequestEvent;
pub use response::HandlerResponse;
