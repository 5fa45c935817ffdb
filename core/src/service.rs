//! Read-only resource service over an injected transport.
//!
//! # Design
//! `OperadorasService` pairs the stateless `OperadorasClient` with a
//! `Transport`. Each accessor issues exactly one request and returns the
//! success body as a `Payload`; failures are normalized and returned, never
//! retried or swallowed.

use tracing::{debug, warn};

use crate::client::OperadorasClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::normalize;
use crate::payload::Payload;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Despesa, Estatisticas, ListParams, Operadora, OperadorasPage};

#[derive(Debug, Clone)]
pub struct OperadorasService<T> {
    client: OperadorasClient,
    transport: T,
}

impl OperadorasService<UreqTransport> {
    /// Service backed by the blocking `ureq` transport.
    pub fn connect(config: ClientConfig) -> Self {
        Self::new(OperadorasClient::new(config), UreqTransport::new())
    }
}

impl<T: Transport> OperadorasService<T> {
    pub fn new(client: OperadorasClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// List operators, one page at a time.
    pub fn listar(&self, params: &ListParams) -> Result<Payload<OperadorasPage>, ApiError> {
        let response = self.send(self.client.build_list_operadoras(params))?;
        self.client.parse_list_operadoras(response).inspect_err(log_failure)
    }

    pub fn obter_por_cnpj(&self, cnpj: &str) -> Result<Payload<Operadora>, ApiError> {
        let response = self.send(self.client.build_get_operadora(cnpj))?;
        self.client.parse_get_operadora(response).inspect_err(log_failure)
    }

    /// Expense history of one operator. An operator without expenses yields
    /// an empty list; an unknown one yields `ApiError::NotFound`.
    pub fn obter_despesas(&self, cnpj: &str) -> Result<Payload<Vec<Despesa>>, ApiError> {
        let response = self.send(self.client.build_get_despesas(cnpj))?;
        self.client.parse_get_despesas(response).inspect_err(log_failure)
    }

    pub fn obter_estatisticas(&self) -> Result<Payload<Estatisticas>, ApiError> {
        let response = self.send(self.client.build_get_estatisticas())?;
        self.client.parse_get_estatisticas(response).inspect_err(log_failure)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, query = ?request.query, "issuing request");
        match self.transport.execute(&request) {
            Ok(response) => {
                debug!(url = %request.url, status = response.status, "response received");
                Ok(response)
            }
            Err(err) => {
                let normalized = normalize::from_transport(&err);
                warn!(url = %request.url, cause = ?err, "request failed: {normalized}");
                Err(normalized)
            }
        }
    }
}

fn log_failure(err: &ApiError) {
    match err {
        ApiError::NotFound { .. } => debug!("not found: {err}"),
        ApiError::Http { status, .. } => warn!(status, "request failed: {err}"),
        _ => warn!("request failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{NETWORK_MESSAGE, TIMEOUT_MESSAGE};
    use crate::http::TransportError;

    /// Records every request and answers with a canned outcome.
    struct FakeTransport {
        outcome: Result<HttpResponse, TransportError>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn responding(status: u16, body: &str) -> Self {
            Self {
                outcome: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: TransportError) -> Self {
            Self {
                outcome: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn service(transport: &FakeTransport) -> OperadorasService<&FakeTransport> {
        let client = OperadorasClient::new(ClientConfig::new("http://localhost:8000"));
        OperadorasService::new(client, transport)
    }

    const STATS: &str = r#"{"total_operadoras":2,"total_operadoras_ativas":1,"total_operadoras_canceladas":1,"total_despesas_geral":10.5,"media_despesas":5.25,"top_5_operadoras":[],"despesas_por_uf":[]}"#;

    #[test]
    fn listar_sends_exactly_one_request() {
        let fake = FakeTransport::responding(
            200,
            r#"{"data":[],"total":0,"page":2,"limit":5,"total_pages":0}"#,
        );
        let page = service(&fake).listar(&ListParams::new(2, 5, "")).unwrap().typed().unwrap();
        assert_eq!(page.page, 2);

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param("page"), Some("2"));
        assert_eq!(requests[0].query_param("limit"), Some("5"));
        assert_eq!(requests[0].query_param("q"), None);
    }

    #[test]
    fn obter_por_cnpj_returns_body() {
        let body = r#"{"reg_ans":"1","cnpj":"12345678000199","razao_social":"ACME","status":"ATIVA"}"#;
        let fake = FakeTransport::responding(200, body);
        let payload = service(&fake).obter_por_cnpj("12345678000199").unwrap();
        assert_eq!(serde_json::to_string(payload.value()).unwrap(), body);
        assert_eq!(payload.typed().unwrap().razao_social, "ACME");
        assert_eq!(
            fake.requests()[0].url,
            "http://localhost:8000/api/operadoras/12345678000199"
        );
    }

    #[test]
    fn timeout_is_normalized_for_every_endpoint() {
        let fake = FakeTransport::failing(TransportError::Timeout);
        let svc = service(&fake);
        let errors = [
            svc.listar(&ListParams::default()).unwrap_err(),
            svc.obter_por_cnpj("1").unwrap_err(),
            svc.obter_despesas("1").unwrap_err(),
            svc.obter_estatisticas().unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
        }
        assert_eq!(fake.requests().len(), 4);
    }

    #[test]
    fn connect_failure_is_network_error() {
        let fake = FakeTransport::failing(TransportError::Connect("refused".to_string()));
        let err = service(&fake).obter_estatisticas().unwrap_err();
        assert_eq!(err, ApiError::Network);
        assert_eq!(err.to_string(), NETWORK_MESSAGE);
    }

    #[test]
    fn despesas_404_uses_detail() {
        let fake = FakeTransport::responding(404, r#"{"detail":"Operator with CNPJ 9 not found"}"#);
        let err = service(&fake).obter_despesas("9").unwrap_err();
        assert_eq!(err.to_string(), "Operator with CNPJ 9 not found");
    }

    #[test]
    fn estatisticas_success() {
        let fake = FakeTransport::responding(200, STATS);
        let stats = service(&fake).obter_estatisticas().unwrap().typed().unwrap();
        assert_eq!(stats.total_operadoras, Some(2));
        assert_eq!(fake.requests()[0].url, "http://localhost:8000/api/estatisticas");
    }
}
