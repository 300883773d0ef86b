//! 통합 테스트용 가짜 계산 서버.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use electrical_calculator::{
    backend::CalculatorBackend,
    error::RemoteError,
    request::{CalculationRequest, CircuitRequest},
    response::{CalculationResponse, SolveResponse},
};
use serde_json::Value;

/// 미리 넣어 둔 응답을 순서대로 돌려주고, 받은 요청을 JSON으로 기록한다.
#[derive(Default)]
pub struct FakeBackend {
    calculate_replies: RefCell<VecDeque<Result<CalculationResponse, RemoteError>>>,
    solve_replies: RefCell<VecDeque<Result<SolveResponse, RemoteError>>>,
    pub requests: RefCell<Vec<Value>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_calculate(self, reply: Result<CalculationResponse, RemoteError>) -> Self {
        self.calculate_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn reply_solve(self, reply: Result<SolveResponse, RemoteError>) -> Self {
        self.solve_replies.borrow_mut().push_back(reply);
        self
    }

    /// `{"results": ..., "formulas": ...}` 형태의 성공 응답을 추가한다.
    pub fn solve_json(self, body: Value) -> Self {
        let response: SolveResponse =
            serde_json::from_value(body).expect("valid solve_circuit body");
        self.reply_solve(Ok(response))
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<Value> {
        self.requests.borrow().last().cloned()
    }
}

impl CalculatorBackend for FakeBackend {
    fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResponse, RemoteError> {
        self.requests
            .borrow_mut()
            .push(serde_json::to_value(request).expect("serializable request"));
        self.calculate_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport("no canned reply".into())))
    }

    fn solve_circuit(&self, request: &CircuitRequest) -> Result<SolveResponse, RemoteError> {
        self.requests
            .borrow_mut()
            .push(serde_json::to_value(request).expect("serializable request"));
        self.solve_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport("no canned reply".into())))
    }
}

/// 서버가 `{"error": ...}`와 함께 400을 돌려준 상황.
pub fn server_error(message: Option<&str>) -> RemoteError {
    RemoteError::Server {
        status: 400,
        message: message.map(str::to_string),
    }
}
