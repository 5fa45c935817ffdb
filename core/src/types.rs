//! DTOs for the operadoras API.
//!
//! # Design
//! These mirror the backend's JSON schema but are defined independently of
//! the mock-server crate; integration tests catch drift between the two.
//! Fields the backend may omit or send as `null` are `Option`. These are a
//! typed view only; callers always get the raw body through `Payload`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination and search parameters for the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub query: String,
}

impl ListParams {
    pub fn new(page: u32, limit: u32, query: &str) -> Self {
        Self {
            page,
            limit,
            query: query.to_string(),
        }
    }

    /// Query pairs in wire order. `q` is present only for a non-empty search.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.query.is_empty() {
            pairs.push(("q".to_string(), self.query.clone()));
        }
        pairs
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(1, 10, "")
    }
}

/// A health-insurance operator. Fields the schema does not name (such as
/// `data_carga` on the detail endpoint) are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operadora {
    pub reg_ans: String,
    pub cnpj: String,
    pub razao_social: String,
    #[serde(default)]
    pub modalidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of the operator listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperadorasPage {
    pub data: Vec<Operadora>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One quarterly expense row of an operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Despesa {
    pub tipo_deducao: String,
    pub reg_ans: String,
    pub razao_social: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    pub trimestre: u8,
    pub ano: u16,
    #[serde(default)]
    pub valor: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopOperadora {
    pub razao_social: String,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub total_despesas: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DespesasPorUf {
    pub uf: String,
    #[serde(default)]
    pub total_despesas: Option<f64>,
    #[serde(default)]
    pub qtd_operadoras: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregate statistics across all operators. SQL aggregates over empty sets
/// come back as `null`, hence the optional numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Estatisticas {
    #[serde(default)]
    pub total_operadoras: Option<u64>,
    #[serde(default)]
    pub total_operadoras_ativas: Option<u64>,
    #[serde(default)]
    pub total_operadoras_canceladas: Option<u64>,
    #[serde(default)]
    pub total_despesas_geral: Option<f64>,
    #[serde(default)]
    pub media_despesas: Option<f64>,
    #[serde(default)]
    pub top_5_operadoras: Vec<TopOperadora>,
    #[serde(default)]
    pub despesas_por_uf: Vec<DespesasPorUf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
