//! 기본 계산기 (전력/저항/전압/전류/에너지) 컨트롤러.
//!
//! 계산 종류마다 입력 칸 두 개를 가진 그룹이 하나씩 있고, 선택된 종류의
//! 그룹만 보인다. 계산 버튼은 중복 클릭 방지 없이 클릭마다 요청 하나를 보낸다.

use crate::backend::CalculatorBackend;
use crate::error::{CalcError, RemoteError, ValidationError};
use crate::input::parse_number;
use crate::report::fixed;
use crate::request::{CalculationRequest, CalculationType};
use crate::response::CalculationResponse;

/// 서버 오류 본문에 메시지가 없을 때 표시할 문구.
pub const FALLBACK_ERROR: &str = "An error occurred";

/// 마지막 계산 결과. `None`이면 결과/오류 영역이 모두 숨겨진 상태.
#[derive(Debug, Clone, PartialEq)]
pub enum BasicOutcome {
    Success { value: String, formula: String },
    Failure(CalcError),
}

#[derive(Debug, Clone)]
pub struct BasicController {
    selected: CalculationType,
    inputs: [[String; 2]; 5],
    outcome: Option<BasicOutcome>,
}

impl Default for BasicController {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicController {
    /// 전력 계산이 선택된 초기 상태.
    pub fn new() -> Self {
        Self {
            selected: CalculationType::Power,
            inputs: Default::default(),
            outcome: None,
        }
    }

    pub fn selected(&self) -> CalculationType {
        self.selected
    }

    /// 계산 종류를 바꾸고 이전 결과와 오류를 지운다.
    pub fn select_type(&mut self, kind: CalculationType) {
        self.selected = kind;
        self.outcome = None;
    }

    pub fn is_group_visible(&self, kind: CalculationType) -> bool {
        self.selected == kind
    }

    /// `slot`은 `CalculationType::inputs` 순서(0 또는 1). 범위를 벗어나면 `None`.
    pub fn input(&self, kind: CalculationType, slot: usize) -> Option<&str> {
        self.inputs[kind.index()].get(slot).map(String::as_str)
    }

    pub fn input_mut(&mut self, kind: CalculationType, slot: usize) -> Option<&mut String> {
        self.inputs[kind.index()].get_mut(slot)
    }

    /// 입력 칸 값을 바꾼다. 없는 칸이면 `false`.
    pub fn set_input(&mut self, kind: CalculationType, slot: usize, text: &str) -> bool {
        match self.input_mut(kind, slot) {
            Some(field) => {
                *field = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn outcome(&self) -> Option<&BasicOutcome> {
        self.outcome.as_ref()
    }

    /// 결과 값 문자열 (예: `20.0000 W`).
    pub fn result_text(&self) -> Option<&str> {
        match &self.outcome {
            Some(BasicOutcome::Success { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// `Formula: ...` 문자열.
    pub fn formula_text(&self) -> Option<&str> {
        match &self.outcome {
            Some(BasicOutcome::Success { formula, .. }) => Some(formula),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.outcome {
            Some(BasicOutcome::Failure(e)) => Some(e.to_string()),
            _ => None,
        }
    }

    /// 이전 결과를 숨기고 선택된 그룹의 입력으로 요청을 만든다.
    ///
    /// 검증에 실패하면 오류를 표시 상태로 남기고 `Err`를 돌려준다.
    pub fn prepare(&mut self) -> Result<CalculationRequest, ValidationError> {
        self.outcome = None;
        let kind = self.selected;
        let [first, second] = &self.inputs[kind.index()];
        match (parse_number(first), parse_number(second)) {
            (Some(a), Some(b)) => Ok(CalculationRequest::new(kind, a, b)),
            _ => {
                tracing::debug!(kind = kind.as_str(), "basic calculation rejected by validation");
                let err = ValidationError::InvalidNumbers;
                self.outcome = Some(BasicOutcome::Failure(err.clone().into()));
                Err(err)
            }
        }
    }

    /// 서버 응답을 결과 또는 오류로 반영한다.
    pub fn complete(
        &mut self,
        request: &CalculationRequest,
        response: Result<CalculationResponse, RemoteError>,
    ) {
        let outcome = match response {
            Ok(CalculationResponse {
                result: Some(value),
                formula,
            }) => BasicOutcome::Success {
                value: format!("{}{}", fixed(value, 4), request.kind().unit_suffix()),
                formula: format!("Formula: {formula}"),
            },
            Ok(CalculationResponse { result: None, .. }) => {
                BasicOutcome::Failure(CalcError::DivideByZero)
            }
            Err(e) => BasicOutcome::Failure(CalcError::remote(e, FALLBACK_ERROR)),
        };
        self.outcome = Some(outcome);
    }

    /// 검증부터 응답 반영까지 한 번에 처리한다. 검증 실패 시 서버를 호출하지 않는다.
    pub fn calculate(&mut self, backend: &dyn CalculatorBackend) {
        if let Ok(request) = self.prepare() {
            let response = backend.calculate(&request);
            self.complete(&request, response);
        }
    }
}
