//! Stateless HTTP request builder and response parser for the operadoras API.
//!
//! # Design
//! `OperadorasClient` holds only its `ClientConfig` and carries no mutable
//! state between calls. Each read operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse` and hands the body back as a `Payload`. Executing the
//! round-trip is left to a `Transport`, keeping this module deterministic and
//! free of I/O.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::normalize;
use crate::payload::Payload;
use crate::types::{Despesa, Estatisticas, ListParams, Operadora, OperadorasPage};

/// Synchronous, stateless client for the operadoras API.
#[derive(Debug, Clone)]
pub struct OperadorasClient {
    config: ClientConfig,
}

impl OperadorasClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn build_list_operadoras(&self, params: &ListParams) -> HttpRequest {
        let mut req = self.get("/api/operadoras");
        req.query = params.query_pairs();
        req
    }

    pub fn build_get_operadora(&self, cnpj: &str) -> HttpRequest {
        self.get(&format!("/api/operadoras/{cnpj}"))
    }

    pub fn build_get_despesas(&self, cnpj: &str) -> HttpRequest {
        self.get(&format!("/api/operadoras/{cnpj}/despesas"))
    }

    pub fn build_get_estatisticas(&self) -> HttpRequest {
        self.get("/api/estatisticas")
    }

    pub fn parse_list_operadoras(&self, response: HttpResponse) -> Result<Payload<OperadorasPage>, ApiError> {
        parse_body(response)
    }

    pub fn parse_get_operadora(&self, response: HttpResponse) -> Result<Payload<Operadora>, ApiError> {
        parse_body(response)
    }

    pub fn parse_get_despesas(&self, response: HttpResponse) -> Result<Payload<Vec<Despesa>>, ApiError> {
        parse_body(response)
    }

    pub fn parse_get_estatisticas(&self, response: HttpResponse) -> Result<Payload<Estatisticas>, ApiError> {
        parse_body(response)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.config.base_url),
            query: Vec::new(),
            headers: self.config.headers.clone(),
            timeout: self.config.timeout,
        }
    }
}

/// Normalize non-2xx statuses; any 2xx body is returned as-is.
fn parse_body<T>(response: HttpResponse) -> Result<Payload<T>, ApiError> {
    if !response.is_success() {
        return Err(normalize::from_response(&response));
    }
    Ok(Payload::from_body(&response.body))
}
