//! 계산 요청 처리 중 발생하는 오류 분류.
//!
//! 로컬 입력 검증 오류(요청 전)와 원격 오류(요청 후)를 구분한다.
//! `Display` 출력이 곧 화면에 표시되는 메시지다.

use thiserror::Error;

/// 요청을 보내기 전에 잡히는 입력 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 기본 계산기: 두 입력 중 하나라도 숫자가 아님
    #[error("Please enter valid numbers for all fields")]
    InvalidNumbers,
    /// DC: 전원 전압이 숫자가 아님
    #[error("Please enter a valid voltage value")]
    InvalidVoltage,
    /// DC 직렬/병렬: 유효한 저항 값이 하나도 없음
    #[error("Please enter at least one resistance value")]
    NoResistances,
    /// DC 분압기: R1/R2 중 하나가 숫자가 아님
    #[error("Please enter valid resistance values for R1 and R2")]
    InvalidDividerResistances,
    /// AC: 전압/주파수/저항 중 하나가 숫자가 아님
    #[error("Please enter valid values for voltage, frequency and resistance")]
    InvalidAcBasics,
    /// AC: 주파수가 0 이하
    #[error("Frequency must be greater than 0")]
    NonPositiveFrequency,
    /// AC: 커패시턴스 누락 또는 0 이하
    #[error("Please enter a valid capacitance value greater than 0")]
    InvalidCapacitance,
    /// AC: 인덕턴스 누락 또는 0 이하
    #[error("Please enter a valid inductance value greater than 0")]
    InvalidInductance,
}

/// 서버 왕복에서 발생한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// 2xx가 아닌 응답. 본문의 `error` 필드가 있으면 `message`에 담긴다.
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },
    /// 연결 실패 등 전송 계층 오류
    #[error("{0}")]
    Transport(String),
    /// 응답 본문을 해석하지 못함
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// 컨트롤러가 화면에 표시하는 최종 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 서버가 `result: null`을 돌려준 경우 (정의되지 않는 연산)
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// 원격 오류. `fallback`은 서버 메시지가 없을 때 쓰는 컨트롤러별 문구.
    #[error("{}", remote_message(.source, .fallback))]
    Remote {
        source: RemoteError,
        fallback: &'static str,
    },
}

impl CalcError {
    pub fn remote(source: RemoteError, fallback: &'static str) -> Self {
        CalcError::Remote { source, fallback }
    }
}

fn remote_message(source: &RemoteError, fallback: &str) -> String {
    match source {
        RemoteError::Server {
            message: Some(msg), ..
        } if !msg.is_empty() => msg.clone(),
        RemoteError::Server { .. } => fallback.to_string(),
        other => other.to_string(),
    }
}
