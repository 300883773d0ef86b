//! 계산 서버와의 HTTP 왕복.
//!
//! 컨트롤러는 `CalculatorBackend` 트레이트에만 의존하므로 테스트에서는
//! 응답을 미리 정해 둔 가짜 백엔드를 쓸 수 있다.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RemoteError;
use crate::request::{CalculationRequest, CircuitRequest};
use crate::response::{CalculationResponse, ErrorBody, SolveResponse};

pub const CALCULATE_PATH: &str = "/calculate";
pub const SOLVE_CIRCUIT_PATH: &str = "/solve_circuit";

/// 요청 하나에 응답 하나를 돌려주는 계산 서버.
pub trait CalculatorBackend {
    fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResponse, RemoteError>;
    fn solve_circuit(&self, request: &CircuitRequest) -> Result<SolveResponse, RemoteError>;
}

/// `ureq` 기반 HTTP 백엔드. 재시도 없이 요청당 한 번만 보낸다.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "sending calculation request");
        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body);
        match response {
            Ok(resp) => resp
                .into_json::<T>()
                .map_err(|e| RemoteError::Decode(e.to_string())),
            Err(ureq::Error::Status(status, resp)) => {
                let message = resp
                    .into_string()
                    .ok()
                    .and_then(|text| error_message_from_body(&text));
                tracing::warn!(status, ?message, "calculation server returned an error");
                Err(RemoteError::Server { status, message })
            }
            Err(ureq::Error::Transport(t)) => {
                tracing::warn!(error = %t, "calculation request failed");
                Err(RemoteError::Transport(t.to_string()))
            }
        }
    }
}

impl CalculatorBackend for HttpBackend {
    fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResponse, RemoteError> {
        self.post(CALCULATE_PATH, request)
    }

    fn solve_circuit(&self, request: &CircuitRequest) -> Result<SolveResponse, RemoteError> {
        self.post(SOLVE_CIRCUIT_PATH, request)
    }
}

/// 오류 응답 본문에서 `error` 문자열을 꺼낸다. JSON이 아니거나 필드가 없으면 `None`.
pub fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field() {
        assert_eq!(
            error_message_from_body(r#"{"error": "float division by zero"}"#),
            Some("float division by zero".to_string())
        );
    }

    #[test]
    fn non_json_or_missing_field_yields_none() {
        assert_eq!(error_message_from_body("<html>500</html>"), None);
        assert_eq!(error_message_from_body(r#"{"detail": "x"}"#), None);
        assert_eq!(error_message_from_body(r#"{"error": ""}"#), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }
}
