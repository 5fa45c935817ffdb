//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request, a simulated
//! response, and either the expected parse result or the expected error
//! message. Success bodies are compared as JSON values, including fields the
//! DTOs do not name, and then through their typed view.

use operadoras_core::{
    ApiError, ClientConfig, Despesa, Estatisticas, HttpMethod, HttpRequest, HttpResponse,
    ListParams, Operadora, OperadorasClient, OperadorasPage, Payload,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8000";

fn client() -> OperadorasClient {
    OperadorasClient::new(ClientConfig::new(BASE_URL))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_query: Vec<(String, String)> = expected
        .get("query")
        .and_then(Value::as_array)
        .map(|pairs| {
            pairs
                .iter()
                .map(|p| {
                    let arr = p.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(req.query, expected_query, "{name}: query");
    assert_eq!(
        req.headers,
        vec![("content-type".to_string(), "application/json".to_string())],
        "{name}: headers"
    );
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare a parse outcome against `expected_result` or `expected_error`.
///
/// On success the raw payload must equal `expected_result` exactly, and the
/// typed view must agree with it.
fn check_outcome<T>(name: &str, case: &Value, result: Result<Payload<T>, ApiError>)
where
    T: DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), expected_error.as_str().unwrap(), "{name}: error message");
    } else {
        let payload = result.unwrap();
        assert_eq!(payload.value(), &case["expected_result"], "{name}: raw body");
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(payload.typed().unwrap(), expected, "{name}: typed view");
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let params = ListParams::new(
            input["page"].as_u64().unwrap() as u32,
            input["limit"].as_u64().unwrap() as u32,
            input["query"].as_str().unwrap(),
        );

        let req = c.build_list_operadoras(&params);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_operadoras(simulated(&case));
        check_outcome::<OperadorasPage>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Get by id
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_operadora(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_operadora(simulated(&case));
        check_outcome::<Operadora>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Despesas
// ---------------------------------------------------------------------------

#[test]
fn despesas_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/despesas.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_despesas(id);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_despesas(simulated(&case));
        check_outcome::<Vec<Despesa>>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Estatisticas
// ---------------------------------------------------------------------------

#[test]
fn estatisticas_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/estatisticas.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_estatisticas();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_estatisticas(simulated(&case));
        check_outcome::<Estatisticas>(name, &case, result);
    }
}
