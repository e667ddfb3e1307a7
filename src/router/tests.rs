//! Unit tests for request dispatch

use super::*;
use crate::error::StandingsError;
use crate::types::{Kpi, Year};
use std::sync::Mutex;

/// Records calls and fails on demand.
#[derive(Debug, Default)]
struct FakeOps {
    fail: bool,
    calls: Mutex<Vec<String>>,
    last_query: Mutex<Option<KpiQuery>>,
}

impl FakeOps {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Operations for FakeOps {
    async fn get_csv(&self) -> Result<FetchOutcome> {
        self.calls.lock().unwrap().push("get_csv".to_string());
        if self.fail {
            return Err(StandingsError::NoData);
        }
        Ok(FetchOutcome {
            records: 20,
            saved: true,
        })
    }

    async fn summarize(&self) -> Result<RenderReport> {
        self.calls.lock().unwrap().push("summarize".to_string());
        if self.fail {
            return Err(StandingsError::EmptyDataset {
                location: "mem".to_string(),
            });
        }
        Ok(RenderReport::default())
    }

    async fn query_kpi(&self, query: KpiQuery) -> Result<Vec<KpiRow>> {
        self.calls.lock().unwrap().push("query_kpi".to_string());
        *self.last_query.lock().unwrap() = Some(query);
        if self.fail {
            return Err(StandingsError::DatasetMissing {
                location: "mem".to_string(),
            });
        }
        Ok(vec![KpiRow {
            year: Year::new(2023),
            team_name: "Arsenal FC".to_string(),
            kpi: Kpi::Won,
            value: Some(28),
        }])
    }
}

fn assert_cors(response: &ApiResponse) {
    assert_eq!(response.headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(response.headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(
        response.headers[ACCESS_CONTROL_ALLOW_METHODS],
        "OPTIONS,POST,GET"
    );
}

const QUERY_BODY: &str = r#"{"StartYear": 2023, "EndYear": 2024, "TeamNameList": ["Arsenal FC"], "KPIName": "won"}"#;

#[tokio::test]
async fn test_get_csv_success() {
    let router = Router::new(FakeOps::default());
    let response = router.dispatch("/get_csv", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "CSV file saved." }));
    assert_cors(&response);
    assert_eq!(router.ops().calls(), vec!["get_csv"]);
}

#[tokio::test]
async fn test_summarize_success() {
    let router = Router::new(FakeOps::default());
    let response = router.dispatch("/summarize", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Summarized" }));
    assert_cors(&response);
}

#[tokio::test]
async fn test_query_success_wraps_rows() {
    let router = Router::new(FakeOps::default());
    let response = router.dispatch("/query_kpi_from_csv", Some(QUERY_BODY)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "Result": [{ "year": 2023, "teamName": "Arsenal FC", "won": 28 }] })
    );

    let query = router.ops().last_query.lock().unwrap().clone().unwrap();
    assert_eq!(query.team_names, Some(vec!["Arsenal FC".to_string()]));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let router = Router::new(FakeOps::default());
    let response = router.dispatch("/unknown_path", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "message": "Not Found" }));
    assert_cors(&response);
    assert!(router.ops().calls().is_empty());
}

#[tokio::test]
async fn test_operation_failure_is_generic_500() {
    let router = Router::new(FakeOps::failing());

    for (path, body) in [
        ("/get_csv", None),
        ("/summarize", None),
        ("/query_kpi_from_csv", Some(QUERY_BODY)),
    ] {
        let response = router.dispatch(path, body).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(response.body, json!({ "message": "Internal Server Error" }));
        assert_cors(&response);
    }
}

#[tokio::test]
async fn test_malformed_query_body_is_500() {
    let router = Router::new(FakeOps::default());

    for body in [None, Some("not json"), Some(r#"{"StartYear": 2023}"#)] {
        let response = router.dispatch("/query_kpi_from_csv", body).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
    assert!(router.ops().calls().is_empty());
}
