//! 고급 회로 풀이 컨트롤러 (DC/AC 탭).
//!
//! 풀이는 `prepare`(검증, 로딩 표시, 요청 생성)와 `complete`(로딩 해제, 결과
//! 반영) 두 단계로 나뉜다. GUI는 그 사이의 HTTP 왕복을 작업 스레드에서
//! 수행하고, CLI와 테스트는 `solve_*`로 한 번에 처리한다.

pub mod ac;
pub mod dc;
pub mod resistors;

pub use ac::{AcConfiguration, AcPanel};
pub use dc::{DcConfiguration, DcPanel};
pub use resistors::{ResistorList, ResistorRow, RowId};

use crate::backend::CalculatorBackend;
use crate::error::{CalcError, RemoteError};
use crate::report::Report;
use crate::request::CircuitRequest;
use crate::response::SolveResponse;

/// 서버 오류 본문에 메시지가 없을 때 표시할 문구.
pub const FALLBACK_ERROR: &str = "An error occurred during calculation";

/// 활성 탭.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitTab {
    Dc,
    Ac,
}

/// 결과를 그릴 때 필요한, 요청 시점의 화면 정보.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderContext {
    Series { resistances: Vec<f64> },
    Parallel { resistances: Vec<f64> },
    /// 입력 전압 칸의 원문을 그대로 표시한다.
    VoltageDivider { input_voltage: String },
    Ac(AcConfiguration),
}

/// 검증을 통과해 서버로 보낼 준비가 된 풀이 요청.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub request: CircuitRequest,
    pub context: RenderContext,
}

impl Submission {
    pub fn tab(&self) -> CircuitTab {
        match self.request {
            CircuitRequest::Dc(_) => CircuitTab::Dc,
            CircuitRequest::Ac(_) => CircuitTab::Ac,
        }
    }

    /// 응답을 구성별 보고서로 바꾼다.
    pub fn render(&self, response: &SolveResponse) -> Result<Report, RemoteError> {
        match &self.context {
            RenderContext::Series { resistances } => dc::series_report(response, resistances),
            RenderContext::Parallel { resistances } => dc::parallel_report(response, resistances),
            RenderContext::VoltageDivider { input_voltage } => {
                dc::divider_report(response, input_voltage)
            }
            RenderContext::Ac(config) => ac::ac_report(*config, response),
        }
    }
}

/// 패널 하나의 결과/오류/로딩 표시 상태.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelView {
    loading: bool,
    report: Option<Report>,
    error: Option<CalcError>,
}

impl PanelView {
    /// 이전 결과와 오류를 숨기고 로딩 표시를 켠다.
    pub fn begin(&mut self) {
        self.report = None;
        self.error = None;
        self.loading = true;
    }

    /// 로딩 표시를 끄고 결과 또는 오류를 보인다. 어떤 결과든 로딩은 항상 꺼진다.
    pub fn finish(&mut self, outcome: Result<Report, CalcError>) {
        self.loading = false;
        match outcome {
            Ok(report) => self.report = Some(report),
            Err(e) => self.error = Some(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn results_html(&self) -> Option<String> {
        self.report.as_ref().map(Report::results_html)
    }

    pub fn formulas_html(&self) -> Option<String> {
        self.report.as_ref().map(Report::formulas_html)
    }
}

/// 응답(또는 원격 오류)을 패널 표시 상태로 반영한다.
pub(crate) fn finish_view(
    view: &mut PanelView,
    submission: &Submission,
    response: Result<SolveResponse, RemoteError>,
) {
    let outcome = response
        .and_then(|resp| submission.render(&resp))
        .map_err(|e| CalcError::remote(e, FALLBACK_ERROR));
    view.finish(outcome);
}

/// DC/AC 두 패널과 탭 상태를 소유하는 컨트롤러.
#[derive(Debug, Clone)]
pub struct AdvancedController {
    tab: CircuitTab,
    pub dc: DcPanel,
    pub ac: AcPanel,
}

impl Default for AdvancedController {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvancedController {
    /// DC 탭이 활성인 초기 상태.
    pub fn new() -> Self {
        Self {
            tab: CircuitTab::Dc,
            dc: DcPanel::new(),
            ac: AcPanel::new(),
        }
    }

    pub fn tab(&self) -> CircuitTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: CircuitTab) {
        self.tab = tab;
    }

    /// 해당 탭 표시와 패널이 활성인지. 항상 정확히 하나만 참이다.
    pub fn is_active(&self, tab: CircuitTab) -> bool {
        self.tab == tab
    }

    /// 작업 스레드에서 돌아온 응답을 요청을 보낸 패널에 반영한다.
    pub fn complete(&mut self, submission: &Submission, response: Result<SolveResponse, RemoteError>) {
        match submission.tab() {
            CircuitTab::Dc => self.dc.complete(submission, response),
            CircuitTab::Ac => self.ac.complete(submission, response),
        }
    }

    pub fn solve_dc(&mut self, backend: &dyn CalculatorBackend) {
        self.dc.solve(backend);
    }

    pub fn solve_ac(&mut self, backend: &dyn CalculatorBackend) {
        self.ac.solve(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn starts_on_dc_and_switches_exclusively() {
        let mut ctrl = AdvancedController::new();
        assert!(ctrl.is_active(CircuitTab::Dc));
        assert!(!ctrl.is_active(CircuitTab::Ac));
        ctrl.select_tab(CircuitTab::Ac);
        assert!(ctrl.is_active(CircuitTab::Ac));
        assert!(!ctrl.is_active(CircuitTab::Dc));
    }

    #[test]
    fn finish_always_clears_loading() {
        let mut view = PanelView::default();
        view.begin();
        assert!(view.is_loading());
        view.finish(Err(ValidationError::InvalidVoltage.into()));
        assert!(!view.is_loading());
        assert_eq!(
            view.error_message().as_deref(),
            Some("Please enter a valid voltage value")
        );

        view.begin();
        assert!(view.error().is_none());
        view.finish(Ok(Report::default()));
        assert!(!view.is_loading());
        assert!(view.report().is_some());
    }
}
