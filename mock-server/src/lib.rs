use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const SEM_DEDUCAO: &str = "SEM DEDUÇÃO";
pub const COM_DEDUCAO: &str = "COM DEDUÇÃO";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Operadora {
    pub reg_ans: String,
    pub cnpj: String,
    pub razao_social: String,
    pub modalidade: Option<String>,
    pub uf: Option<String>,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Despesa {
    pub tipo_deducao: String,
    pub reg_ans: String,
    pub razao_social: String,
    pub cnpj: String,
    pub trimestre: u8,
    pub ano: u16,
    pub valor: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pagina {
    pub data: Vec<Operadora>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopOperadora {
    pub razao_social: String,
    pub uf: Option<String>,
    pub total_despesas: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DespesasPorUf {
    pub uf: String,
    pub total_despesas: f64,
    pub qtd_operadoras: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Estatisticas {
    pub total_operadoras: u64,
    pub total_operadoras_ativas: u64,
    pub total_operadoras_canceladas: u64,
    pub total_despesas_geral: f64,
    pub media_despesas: f64,
    pub top_5_operadoras: Vec<TopOperadora>,
    pub despesas_por_uf: Vec<DespesasPorUf>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub q: Option<String>,
}

/// Error response rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiFailure {
    fn not_found(cnpj: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: format!("Operator with CNPJ {cnpj} not found"),
        }
    }

    fn unprocessable(detail: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

/// Immutable in-memory dataset served by the mock API.
#[derive(Debug, Default, Clone)]
pub struct Store {
    pub operadoras: Vec<Operadora>,
    pub despesas: Vec<Despesa>,
}

pub type Db = Arc<Store>;

impl Store {
    pub fn new(operadoras: Vec<Operadora>, despesas: Vec<Despesa>) -> Self {
        Self {
            operadoras,
            despesas,
        }
    }

    /// A small, fixed dataset covering active and cancelled operators, several
    /// UFs, and one operator without expenses.
    pub fn seeded() -> Self {
        let operadoras = vec![
            operadora("326305", "12345678000199", "ACME SAUDE LTDA", Some("Medicina de Grupo"), Some("SP"), "ATIVA"),
            operadora("359017", "23456789000188", "BRAVO ASSISTENCIA MEDICA S.A.", Some("Cooperativa Medica"), Some("RJ"), "ATIVA"),
            operadora("368253", "34567890000177", "CENTRAL ODONTO", Some("Odontologia de Grupo"), Some("MG"), "ATIVA"),
            operadora("402111", "45678901000166", "DELTA PLANOS DE SAUDE", Some("Seguradora"), Some("SP"), "CANCELADA"),
            operadora("417955", "56789012000155", "ECO VIDA AUTOGESTAO", Some("Autogestao"), None, "ATIVA"),
        ];

        let mut despesas = Vec::new();
        let quarters: [(u16, u8); 3] = [(2024, 3), (2024, 4), (2025, 1)];
        let base: [(&str, f64); 4] = [
            ("326305", 1_500_000.0),
            ("359017", 900_000.0),
            ("368253", 120_000.0),
            ("402111", 40_000.0),
        ];
        for (reg_ans, amount) in base {
            let op = operadoras
                .iter()
                .find(|o| o.reg_ans == reg_ans)
                .cloned()
                .unwrap_or_default();
            for (i, (ano, trimestre)) in quarters.iter().enumerate() {
                let valor = amount + 10_000.0 * i as f64;
                despesas.push(despesa(&op, SEM_DEDUCAO, *ano, *trimestre, valor));
                despesas.push(despesa(&op, COM_DEDUCAO, *ano, *trimestre, valor * 0.9));
            }
        }

        Self::new(operadoras, despesas)
    }

    pub fn find(&self, cnpj: &str) -> Option<&Operadora> {
        self.operadoras.iter().find(|o| o.cnpj == cnpj)
    }

    /// Case-insensitive substring match on `razao_social` or `cnpj`, ordered
    /// by `(status, razao_social)`, then offset-paginated.
    pub fn listar(&self, page: u32, limit: u32, busca: Option<&str>) -> Pagina {
        let needle = busca.filter(|b| !b.is_empty()).map(str::to_lowercase);
        let mut matching: Vec<&Operadora> = self
            .operadoras
            .iter()
            .filter(|o| match &needle {
                Some(n) => o.razao_social.to_lowercase().contains(n) || o.cnpj.to_lowercase().contains(n),
                None => true,
            })
            .collect();
        matching.sort_by(|a, b| (&a.status, &a.razao_social).cmp(&(&b.status, &b.razao_social)));

        let total = matching.len() as u64;
        let offset = (page as usize - 1) * limit as usize;
        let data = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();
        let total_pages = total.div_ceil(limit as u64);

        Pagina {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Expense rows ordered by deduction type (descending), year, quarter.
    pub fn despesas_de(&self, op: &Operadora) -> Vec<Despesa> {
        let mut rows: Vec<Despesa> = self
            .despesas
            .iter()
            .filter(|d| d.reg_ans == op.reg_ans)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.tipo_deducao
                .cmp(&a.tipo_deducao)
                .then(a.ano.cmp(&b.ano))
                .then(a.trimestre.cmp(&b.trimestre))
        });
        rows
    }

    /// Aggregates over deduction-free rows only, so each quarter counts once.
    pub fn estatisticas(&self) -> Estatisticas {
        let count_status = |status: &str| self.operadoras.iter().filter(|o| o.status == status).count() as u64;

        // reg_ans -> (total, quarters)
        let mut per_operadora: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
        for d in self.despesas.iter().filter(|d| d.tipo_deducao == SEM_DEDUCAO) {
            let entry = per_operadora.entry(d.reg_ans.as_str()).or_default();
            entry.0 += d.valor;
            entry.1 += 1;
        }

        let total_despesas_geral: f64 = per_operadora.values().map(|(total, _)| total).sum();
        let media_despesas = if per_operadora.is_empty() {
            0.0
        } else {
            per_operadora
                .values()
                .map(|(total, n)| total / *n as f64)
                .sum::<f64>()
                / per_operadora.len() as f64
        };

        let mut top: Vec<TopOperadora> = per_operadora
            .iter()
            .filter_map(|(reg_ans, (total, _))| {
                let op = self.operadoras.iter().find(|o| o.reg_ans == *reg_ans)?;
                Some(TopOperadora {
                    razao_social: op.razao_social.clone(),
                    uf: op.uf.clone(),
                    total_despesas: *total,
                })
            })
            .collect();
        top.sort_by(|a, b| b.total_despesas.total_cmp(&a.total_despesas));
        top.truncate(5);

        let mut por_uf: BTreeMap<String, (f64, u64)> = BTreeMap::new();
        for (reg_ans, (total, _)) in &per_operadora {
            let uf = self
                .operadoras
                .iter()
                .find(|o| o.reg_ans == *reg_ans)
                .and_then(|o| o.uf.clone());
            if let Some(uf) = uf {
                let entry = por_uf.entry(uf).or_default();
                entry.0 += total;
                entry.1 += 1;
            }
        }
        let mut despesas_por_uf: Vec<DespesasPorUf> = por_uf
            .into_iter()
            .map(|(uf, (total_despesas, qtd_operadoras))| DespesasPorUf {
                uf,
                total_despesas,
                qtd_operadoras,
            })
            .collect();
        despesas_por_uf.sort_by(|a, b| b.total_despesas.total_cmp(&a.total_despesas));

        Estatisticas {
            total_operadoras: self.operadoras.len() as u64,
            total_operadoras_ativas: count_status("ATIVA"),
            total_operadoras_canceladas: count_status("CANCELADA"),
            total_despesas_geral,
            media_despesas,
            top_5_operadoras: top,
            despesas_por_uf,
        }
    }
}

fn operadora(reg_ans: &str, cnpj: &str, razao_social: &str, modalidade: Option<&str>, uf: Option<&str>, status: &str) -> Operadora {
    Operadora {
        reg_ans: reg_ans.to_string(),
        cnpj: cnpj.to_string(),
        razao_social: razao_social.to_string(),
        modalidade: modalidade.map(str::to_string),
        uf: uf.map(str::to_string),
        status: status.to_string(),
    }
}

fn despesa(op: &Operadora, tipo: &str, ano: u16, trimestre: u8, valor: f64) -> Despesa {
    Despesa {
        tipo_deducao: tipo.to_string(),
        reg_ans: op.reg_ans.clone(),
        razao_social: op.razao_social.clone(),
        cnpj: op.cnpj.clone(),
        trimestre,
        ano,
        valor,
    }
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(store);
    Router::new()
        .route("/api/operadoras", get(listar_operadoras))
        .route("/api/operadoras/{cnpj}", get(obter_operadora))
        .route("/api/operadoras/{cnpj}/despesas", get(obter_despesas))
        .route("/api/estatisticas", get(obter_estatisticas))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Store::seeded()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn listar_operadoras(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Pagina>, ApiFailure> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    if page < 1 {
        return Err(ApiFailure::unprocessable("page must be greater than or equal to 1"));
    }
    if !(1..=100).contains(&limit) {
        return Err(ApiFailure::unprocessable("limit must be between 1 and 100"));
    }
    let page = u32::try_from(page).map_err(|_| ApiFailure::unprocessable("page is too large"))?;
    tracing::debug!(page, limit, q = ?query.q, "listing operadoras");
    Ok(Json(db.listar(page, limit as u32, query.q.as_deref())))
}

async fn obter_operadora(
    State(db): State<Db>,
    Path(cnpj): Path<String>,
) -> Result<Json<Operadora>, ApiFailure> {
    db.find(&cnpj).cloned().map(Json).ok_or_else(|| ApiFailure::not_found(&cnpj))
}

async fn obter_despesas(
    State(db): State<Db>,
    Path(cnpj): Path<String>,
) -> Result<Json<Vec<Despesa>>, ApiFailure> {
    let op = db.find(&cnpj).ok_or_else(|| ApiFailure::not_found(&cnpj))?;
    Ok(Json(db.despesas_de(op)))
}

async fn obter_estatisticas(State(db): State<Db>) -> Json<Estatisticas> {
    Json(db.estatisticas())
}
