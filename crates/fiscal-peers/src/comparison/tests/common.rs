use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};

use crate::comparison::{ComparisonService, StageOptions};
use crate::dataset::{self, Dataset};

pub(super) fn dataset() -> Dataset {
    let raw = json!({
        "metadata": {
            "source": "NC Local Government Commission, Annual Financial Information Report (AFIR)",
            "fiscalYear": "FY 2024-2025",
            "asOf": "June 30, 2025",
            "generatedAt": "2025-08-01T09:30:00+00:00",
            "totalMunicipalities": 4
        },
        "municipalities": {
            "Apex": {
                "name": "Apex", "group": "10,000 to 49,999", "dominantCounty": "Wake",
                "population": 72000, "hasAuditData": true,
                "fbaPct": 0.42, "fbaPctGroupAvg": 0.38, "fbaPctStateAvg": 0.51,
                "fbaDollars": 31000000, "gfExcess": 1250000,
                "gfRevenues": 81000000, "gfExpenditures": 76000000,
                "taxRateAdj": 0.395, "taxRateNominal": 0.39,
                "taxRateAdjGroupAvg": 0.47, "taxRateAdjStateAvg": 0.49,
                "assessedValAdj": 15800000000.0, "avPerCapita": 219444, "revalYear": 2024
            },
            "Fuquay-Varina": {
                "name": "Fuquay-Varina", "group": "10,000 to 49,999", "dominantCounty": "Wake",
                "population": 41000, "hasAuditData": true,
                "fbaPct": 0.33, "fbaPctGroupAvg": 0.38, "fbaPctStateAvg": 0.51,
                "taxRateAdj": 0.435, "taxRateAdjGroupAvg": 0.47, "taxRateAdjStateAvg": 0.49,
                "avPerCapita": 150000
            },
            "Garner": {
                "name": "Garner", "group": "10,000 to 49,999", "dominantCounty": "Wake",
                "population": 33000, "hasAuditData": false,
                "fbaPctGroupAvg": 0.38, "fbaPctStateAvg": 0.51,
                "taxRateAdj": 0.52, "taxRateAdjGroupAvg": 0.47, "taxRateAdjStateAvg": 0.49
            },
            "Bald Head Island": {
                "name": "Bald Head Island", "group": "Under 2,500",
                "population": 300, "hasAuditData": true,
                "fbaPct": 1.85, "taxRateAdj": 0.36, "avPerCapita": 4800000
            }
        },
        "groups": {
            "10,000 to 49,999": ["Apex", "Fuquay-Varina", "Garner"],
            "Under 2,500": ["Bald Head Island"]
        }
    });

    dataset::from_json_str(&raw.to_string()).expect("fixture dataset parses")
}

pub(super) fn service() -> Arc<ComparisonService> {
    Arc::new(ComparisonService::new(
        Arc::new(dataset()),
        StageOptions::default(),
    ))
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
