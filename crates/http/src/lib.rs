//! Notes HTTP client
//!
//! A thin, typed layer over `reqwest` for the notes REST API. The client
//! attaches the current access token to every request and hands back the
//! raw status and body; deciding what a 4xx or 5xx means is left to the
//! caller.

pub mod client;
pub mod types;

pub use reqwest::{Method, StatusCode};

pub use client::{
    ApiResponse, NotesClient, NotesClientBuilder, TokenSource,
    endpoint::{API_URL_ENV, DEFAULT_BASE_URL, resolve_base_url},
    error::{ClientError, ServerError},
};
