//! DC 회로 패널 (직렬/병렬/분압기).

use crate::backend::CalculatorBackend;
use crate::error::{RemoteError, ValidationError};
use crate::input::parse_number;
use crate::report::{fixed, ComponentTable, Report, MISSING};
use crate::request::{CircuitRequest, DcCircuit};
use crate::response::{DividerResults, ParallelResults, SeriesResults, SolveResponse};

use super::{finish_view, PanelView, RenderContext, ResistorList, Submission};

/// DC 회로 구성.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcConfiguration {
    Series,
    Parallel,
    VoltageDivider,
}

impl DcConfiguration {
    pub const ALL: [DcConfiguration; 3] = [
        DcConfiguration::Series,
        DcConfiguration::Parallel,
        DcConfiguration::VoltageDivider,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DcConfiguration::Series => "series",
            DcConfiguration::Parallel => "parallel",
            DcConfiguration::VoltageDivider => "voltage_divider",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DcConfiguration::Series => "Series",
            DcConfiguration::Parallel => "Parallel",
            DcConfiguration::VoltageDivider => "Voltage Divider",
        }
    }
}

/// DC 패널 입력과 표시 상태.
#[derive(Debug, Clone)]
pub struct DcPanel {
    configuration: DcConfiguration,
    pub voltage: String,
    pub resistors: ResistorList,
    pub r1: String,
    pub r2: String,
    view: PanelView,
}

impl Default for DcPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DcPanel {
    pub fn new() -> Self {
        Self {
            configuration: DcConfiguration::Series,
            voltage: String::new(),
            resistors: ResistorList::new(),
            r1: String::new(),
            r2: String::new(),
            view: PanelView::default(),
        }
    }

    pub fn configuration(&self) -> DcConfiguration {
        self.configuration
    }

    pub fn select_configuration(&mut self, configuration: DcConfiguration) {
        self.configuration = configuration;
    }

    /// 직렬/병렬 공용 저항 목록 그룹이 보이는지.
    pub fn is_resistor_group_visible(&self) -> bool {
        self.configuration != DcConfiguration::VoltageDivider
    }

    /// R1/R2 분압기 그룹이 보이는지. `is_resistor_group_visible`과 항상 반대다.
    pub fn is_divider_group_visible(&self) -> bool {
        self.configuration == DcConfiguration::VoltageDivider
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    /// 로딩을 켜고 입력을 검증해 요청을 만든다. 실패하면 오류를 표시하고 로딩을 끈다.
    pub fn prepare(&mut self) -> Result<Submission, ValidationError> {
        self.view.begin();
        match self.build_submission() {
            Ok(submission) => Ok(submission),
            Err(err) => {
                tracing::debug!(
                    configuration = self.configuration.as_str(),
                    %err,
                    "dc circuit rejected by validation"
                );
                self.view.finish(Err(err.clone().into()));
                Err(err)
            }
        }
    }

    fn build_submission(&self) -> Result<Submission, ValidationError> {
        let voltage_source = parse_number(&self.voltage).ok_or(ValidationError::InvalidVoltage)?;
        let (circuit, context) = match self.configuration {
            DcConfiguration::Series | DcConfiguration::Parallel => {
                let resistances = self.resistors.values();
                if resistances.is_empty() {
                    return Err(ValidationError::NoResistances);
                }
                if self.configuration == DcConfiguration::Series {
                    (
                        DcCircuit::Series {
                            voltage_source,
                            resistances: resistances.clone(),
                        },
                        RenderContext::Series { resistances },
                    )
                } else {
                    (
                        DcCircuit::Parallel {
                            voltage_source,
                            resistances: resistances.clone(),
                        },
                        RenderContext::Parallel { resistances },
                    )
                }
            }
            DcConfiguration::VoltageDivider => {
                let (r1, r2) = match (parse_number(&self.r1), parse_number(&self.r2)) {
                    (Some(r1), Some(r2)) => (r1, r2),
                    _ => return Err(ValidationError::InvalidDividerResistances),
                };
                (
                    DcCircuit::VoltageDivider {
                        voltage_source,
                        r1,
                        r2,
                    },
                    RenderContext::VoltageDivider {
                        input_voltage: self.voltage.clone(),
                    },
                )
            }
        };
        Ok(Submission {
            request: CircuitRequest::Dc(circuit),
            context,
        })
    }

    pub fn complete(&mut self, submission: &Submission, response: Result<SolveResponse, RemoteError>) {
        finish_view(&mut self.view, submission, response);
    }

    pub fn solve(&mut self, backend: &dyn CalculatorBackend) {
        if let Ok(submission) = self.prepare() {
            let response = backend.solve_circuit(&submission.request);
            self.complete(&submission, response);
        }
    }
}

fn component_table(
    middle_header: &str,
    resistances: &[f64],
    middle: &[f64],
    powers: &[f64],
) -> ComponentTable {
    let rows = middle
        .iter()
        .enumerate()
        .map(|(i, value)| {
            vec![
                format!("R{}", i + 1),
                resistances
                    .get(i)
                    .map(|r| fixed(*r, 3))
                    .unwrap_or_else(|| MISSING.to_string()),
                fixed(*value, 3),
                powers
                    .get(i)
                    .map(|p| fixed(*p, 3))
                    .unwrap_or_else(|| MISSING.to_string()),
            ]
        })
        .collect();
    ComponentTable {
        headers: vec![
            "Component".to_string(),
            "Resistance (Ω)".to_string(),
            middle_header.to_string(),
            "Power (W)".to_string(),
        ],
        rows,
    }
}

/// 직렬 회로 보고서. 저항 열은 서버가 준 값이 있으면 그것을, 없으면 보낸 값을 쓴다.
pub fn series_report(response: &SolveResponse, submitted: &[f64]) -> Result<Report, RemoteError> {
    let results: SeriesResults = response.results_as()?;
    let mut report = Report::with_formulas(response.formulas());
    report.row("Total Resistance", format!("{} Ω", fixed(results.total_resistance, 3)));
    report.row("Circuit Current", format!("{} A", fixed(results.current, 3)));
    report.row("Total Power", format!("{} W", fixed(results.total_power, 3)));
    let resistances = results.resistances.as_deref().unwrap_or(submitted);
    report.components = Some(component_table(
        "Voltage (V)",
        resistances,
        &results.voltage_drops,
        &results.powers,
    ));
    Ok(report)
}

/// 병렬 회로 보고서.
pub fn parallel_report(response: &SolveResponse, submitted: &[f64]) -> Result<Report, RemoteError> {
    let results: ParallelResults = response.results_as()?;
    let mut report = Report::with_formulas(response.formulas());
    report.row("Total Resistance", format!("{} Ω", fixed(results.total_resistance, 3)));
    report.row("Total Current", format!("{} A", fixed(results.total_current, 3)));
    report.row("Total Power", format!("{} W", fixed(results.total_power, 3)));
    let resistances = results.resistances.as_deref().unwrap_or(submitted);
    report.components = Some(component_table(
        "Current (A)",
        resistances,
        &results.branch_currents,
        &results.powers,
    ));
    Ok(report)
}

/// 분압기 보고서. 입력 전압은 입력 칸 원문을 그대로 표시한다.
pub fn divider_report(response: &SolveResponse, input_voltage: &str) -> Result<Report, RemoteError> {
    let results: DividerResults = response.results_as()?;
    let mut report = Report::with_formulas(response.formulas());
    report.row("Input Voltage", format!("{input_voltage} V"));
    report.row(
        "Output Voltage (across R2)",
        format!("{} V", fixed(results.output_voltage, 3)),
    );
    report.row("Current", format!("{} A", fixed(results.current, 3)));
    report.row("Total Resistance", format!("{} Ω", fixed(results.total_resistance, 3)));
    report.row("Power through R1", format!("{} W", fixed(results.power_r1, 3)));
    report.row("Power through R2", format!("{} W", fixed(results.power_r2, 3)));
    report.row("Total Power", format!("{} W", fixed(results.total_power, 3)));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_mutually_exclusive() {
        let mut panel = DcPanel::new();
        for config in DcConfiguration::ALL {
            panel.select_configuration(config);
            assert_ne!(
                panel.is_resistor_group_visible(),
                panel.is_divider_group_visible()
            );
        }
        panel.select_configuration(DcConfiguration::VoltageDivider);
        assert!(panel.is_divider_group_visible());
        panel.select_configuration(DcConfiguration::Parallel);
        assert!(!panel.is_divider_group_visible());
    }

    #[test]
    fn divider_requires_both_resistors() {
        let mut panel = DcPanel::new();
        panel.select_configuration(DcConfiguration::VoltageDivider);
        panel.voltage = "9".into();
        panel.r1 = "1000".into();
        assert_eq!(
            panel.prepare().unwrap_err(),
            ValidationError::InvalidDividerResistances
        );
        assert!(!panel.view().is_loading());
    }

    #[test]
    fn voltage_checked_before_resistors() {
        let mut panel = DcPanel::new();
        assert_eq!(panel.prepare().unwrap_err(), ValidationError::InvalidVoltage);
        panel.voltage = "12".into();
        assert_eq!(panel.prepare().unwrap_err(), ValidationError::NoResistances);
    }
}
