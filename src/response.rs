//! 계산 서버 응답 본문.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::RemoteError;

/// `POST /calculate` 성공 응답. `result`가 `null`이면 정의되지 않는 연산이다.
/// `result` 키 자체가 없으면 해석 오류다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalculationResponse {
    #[serde(deserialize_with = "Option::deserialize")]
    pub result: Option<f64>,
    #[serde(default)]
    pub formula: String,
}

/// 2xx가 아닌 응답의 본문.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /solve_circuit` 성공 응답.
///
/// `results`의 필드 구성은 회로 구성에 따라 다르므로 원본 그대로 보관하고
/// 렌더링 시점에 구성별 구조체로 해석한다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolveResponse {
    pub results: Value,
    #[serde(default)]
    formulas: Map<String, Value>,
}

impl SolveResponse {
    pub fn new(results: Value, formulas: Map<String, Value>) -> Self {
        Self { results, formulas }
    }

    /// `results`를 구성별 구조체로 해석한다.
    pub fn results_as<T: DeserializeOwned>(&self) -> Result<T, RemoteError> {
        serde_json::from_value(self.results.clone())
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// 공식 목록을 받은 순서 그대로 `(이름, 공식)` 쌍으로 돌려준다.
    pub fn formulas(&self) -> Vec<(String, String)> {
        self.formulas
            .iter()
            .map(|(label, formula)| {
                let text = match formula {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (label.clone(), text)
            })
            .collect()
    }
}

/// DC 직렬 회로 결과.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesResults {
    pub total_resistance: f64,
    pub current: f64,
    pub total_power: f64,
    pub voltage_drops: Vec<f64>,
    pub powers: Vec<f64>,
    #[serde(default)]
    pub resistances: Option<Vec<f64>>,
}

/// DC 병렬 회로 결과.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParallelResults {
    pub total_resistance: f64,
    pub total_current: f64,
    pub total_power: f64,
    pub branch_currents: Vec<f64>,
    pub powers: Vec<f64>,
    #[serde(default)]
    pub resistances: Option<Vec<f64>>,
}

/// DC 분압기 결과.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DividerResults {
    pub output_voltage: f64,
    pub total_resistance: f64,
    pub current: f64,
    pub power_r1: f64,
    pub power_r2: f64,
    pub total_power: f64,
}

/// AC 공통 결과.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AcSummary {
    pub impedance: f64,
    pub phase_angle: f64,
    pub current: f64,
    pub power_factor: f64,
    pub real_power: f64,
    pub reactive_power: f64,
    pub apparent_power: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RcResults {
    #[serde(flatten)]
    pub summary: AcSummary,
    pub time_constant: f64,
    pub voltage_r: f64,
    pub voltage_c: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RlResults {
    #[serde(flatten)]
    pub summary: AcSummary,
    pub time_constant: f64,
    pub voltage_r: f64,
    pub voltage_l: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RlcResults {
    #[serde(flatten)]
    pub summary: AcSummary,
    pub voltage_r: f64,
    pub voltage_l: f64,
    pub voltage_c: f64,
    pub resonant_frequency: f64,
}
