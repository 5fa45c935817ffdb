//! Client core for the operadoras (health-insurance operator) API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `OperadorasService` pairs the
//! builder with a `Transport` and exposes the four read-only accessors. Success
//! bodies come back verbatim as a `Payload`, with an optional typed view.
//!
//! # Design
//! - `OperadorasClient` is stateless; it holds only an explicit `ClientConfig`.
//! - Every failure becomes one `ApiError` via the pure functions in
//!   `normalize`; its `Display` text is the user-facing message.
//! - The transport is injected, so tests run against fakes or the mock server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod payload;
pub mod routes;
pub mod service;
pub mod transport;
pub mod types;

pub use client::OperadorasClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use payload::Payload;
pub use routes::Route;
pub use service::OperadorasService;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Despesa, DespesasPorUf, Estatisticas, ListParams, Operadora, OperadorasPage, TopOperadora,
};
