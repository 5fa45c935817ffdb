//! Navigation routes of the operadoras front end.
//!
//! Two named views exist: the operator listing at `/` and the operator detail
//! at `/operadora/{cnpj}`. The detail route carries the identifier that the
//! view passes to `OperadorasService::obter_por_cnpj` and
//! `OperadorasService::obter_despesas`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Detalhes { cnpj: String },
}

const DETAIL_PREFIX: &str = "/operadora/";

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Detalhes { .. } => "Detalhes",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Detalhes { cnpj } => format!("{DETAIL_PREFIX}{cnpj}"),
        }
    }

    /// Match a location path against the route table. The query string and
    /// fragment are ignored, as is a single trailing slash.
    pub fn resolve(location: &str) -> Option<Route> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        if path == "/" {
            return Some(Route::Home);
        }
        let cnpj = path.strip_prefix(DETAIL_PREFIX)?;
        if cnpj.is_empty() || cnpj.contains('/') {
            return None;
        }
        Some(Route::Detalhes {
            cnpj: cnpj.to_string(),
        })
    }
}
