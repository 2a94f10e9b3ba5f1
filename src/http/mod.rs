//! HTTP client wrapper for the TrackCase REST service.

mod client;
mod error;
mod response;
mod url;

pub use client::{FetchOptions, HttpClient, USERNAME_HEADER};
pub use error::HttpError;
pub use response::{error_message, ApiResponse};
pub use url::{build_url, INCLUDE_EXTRA, INCLUDE_HISTORY};

pub use reqwest::Method;
