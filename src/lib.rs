//! 전기 계산기 클라이언트. 폼 상태와 요청/응답 처리를 라이브러리로 분리해
//! CLI와 GUI가 같은 컨트롤러를 공유한다. 회로 계산 자체는 외부 서버가 한다.

pub mod app;
pub mod backend;
pub mod basic;
pub mod circuit;
pub mod config;
pub mod error;
pub mod i18n;
pub mod input;
pub mod report;
pub mod request;
pub mod response;
pub mod ui_cli;
