//! AC 회로 패널 (RC/RL/RLC).

use crate::backend::CalculatorBackend;
use crate::error::{RemoteError, ValidationError};
use crate::input::{parse_number, parse_positive};
use crate::report::{fixed, Report};
use crate::request::{AcCircuit, CircuitRequest};
use crate::response::{AcSummary, RcResults, RlResults, RlcResults, SolveResponse};

use super::{finish_view, PanelView, RenderContext, Submission};

/// AC 회로 구성.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcConfiguration {
    Rc,
    Rl,
    Rlc,
}

impl AcConfiguration {
    pub const ALL: [AcConfiguration; 3] = [AcConfiguration::Rc, AcConfiguration::Rl, AcConfiguration::Rlc];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcConfiguration::Rc => "rc",
            AcConfiguration::Rl => "rl",
            AcConfiguration::Rlc => "rlc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AcConfiguration::Rc => "RC Circuit",
            AcConfiguration::Rl => "RL Circuit",
            AcConfiguration::Rlc => "RLC Circuit",
        }
    }

    pub fn uses_capacitance(&self) -> bool {
        matches!(self, AcConfiguration::Rc | AcConfiguration::Rlc)
    }

    pub fn uses_inductance(&self) -> bool {
        matches!(self, AcConfiguration::Rl | AcConfiguration::Rlc)
    }
}

/// AC 패널 입력과 표시 상태. 커패시턴스는 μF, 인덕턴스는 mH.
#[derive(Debug, Clone)]
pub struct AcPanel {
    configuration: AcConfiguration,
    pub voltage: String,
    pub frequency: String,
    pub resistance: String,
    pub capacitance: String,
    pub inductance: String,
    view: PanelView,
}

impl Default for AcPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AcPanel {
    pub fn new() -> Self {
        Self {
            configuration: AcConfiguration::Rc,
            voltage: String::new(),
            frequency: String::new(),
            resistance: String::new(),
            capacitance: String::new(),
            inductance: String::new(),
            view: PanelView::default(),
        }
    }

    pub fn configuration(&self) -> AcConfiguration {
        self.configuration
    }

    pub fn select_configuration(&mut self, configuration: AcConfiguration) {
        self.configuration = configuration;
    }

    pub fn is_capacitance_visible(&self) -> bool {
        self.configuration.uses_capacitance()
    }

    pub fn is_inductance_visible(&self) -> bool {
        self.configuration.uses_inductance()
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
                    "ac circuit rejected by validation"
                );
                self.view.finish(Err(err.clone().into()));
                Err(err)
            }
        }
    }

    fn build_submission(&self) -> Result<Submission, ValidationError> {
        let (voltage_source, frequency, resistance) = match (
            parse_number(&self.voltage),
            parse_number(&self.frequency),
            parse_number(&self.resistance),
        ) {
            (Some(v), Some(f), Some(r)) => (v, f, r),
            _ => return Err(ValidationError::InvalidAcBasics),
        };
        if frequency <= 0.0 {
            return Err(ValidationError::NonPositiveFrequency);
        }
        let capacitance = || parse_positive(&self.capacitance).ok_or(ValidationError::InvalidCapacitance);
        let inductance = || parse_positive(&self.inductance).ok_or(ValidationError::InvalidInductance);
        let circuit = match self.configuration {
            AcConfiguration::Rc => AcCircuit::Rc {
                voltage_source,
                frequency,
                resistance,
                capacitance: capacitance()?,
            },
            AcConfiguration::Rl => AcCircuit::Rl {
                voltage_source,
                frequency,
                resistance,
                inductance: inductance()?,
            },
            AcConfiguration::Rlc => {
                let capacitance = capacitance()?;
                AcCircuit::Rlc {
                    voltage_source,
                    frequency,
                    resistance,
                    capacitance,
                    inductance: inductance()?,
                }
            }
        };
        Ok(Submission {
            request: CircuitRequest::Ac(circuit),
            context: RenderContext::Ac(self.configuration),
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

fn summary_rows(report: &mut Report, s: &AcSummary) {
    report.row("Impedance (Z)", format!("{} Ω", fixed(s.impedance, 3)));
    report.row("Phase Angle", format!("{}°", fixed(s.phase_angle, 2)));
    report.row("Current", format!("{} A", fixed(s.current, 3)));
    report.row("Power Factor", fixed(s.power_factor, 3));
    report.row("Real Power (P)", format!("{} W", fixed(s.real_power, 3)));
    report.row("Reactive Power (Q)", format!("{} VAR", fixed(s.reactive_power, 3)));
    report.row("Apparent Power (S)", format!("{} VA", fixed(s.apparent_power, 3)));
}

fn time_constant_row(report: &mut Report, tau: f64) {
    report.row("Time Constant (τ)", format!("{} s", fixed(tau, 6)));
}

fn volts(report: &mut Report, label: &str, value: f64) {
    report.row(label, format!("{} V", fixed(value, 3)));
}

/// AC 구성별 보고서.
pub fn ac_report(configuration: AcConfiguration, response: &SolveResponse) -> Result<Report, RemoteError> {
    let mut report = Report::with_formulas(response.formulas());
    match configuration {
        AcConfiguration::Rc => {
            let r: RcResults = response.results_as()?;
            summary_rows(&mut report, &r.summary);
            time_constant_row(&mut report, r.time_constant);
            volts(&mut report, "Voltage across Resistor", r.voltage_r);
            volts(&mut report, "Voltage across Capacitor", r.voltage_c);
        }
        AcConfiguration::Rl => {
            let r: RlResults = response.results_as()?;
            summary_rows(&mut report, &r.summary);
            time_constant_row(&mut report, r.time_constant);
            volts(&mut report, "Voltage across Resistor", r.voltage_r);
            volts(&mut report, "Voltage across Inductor", r.voltage_l);
        }
        AcConfiguration::Rlc => {
            let r: RlcResults = response.results_as()?;
            summary_rows(&mut report, &r.summary);
            volts(&mut report, "Voltage across Resistor", r.voltage_r);
            volts(&mut report, "Voltage across Inductor", r.voltage_l);
            volts(&mut report, "Voltage across Capacitor", r.voltage_c);
            report.row(
                "Resonant Frequency",
                format!("{} Hz", fixed(r.resonant_frequency, 3)),
            );
        }
    }
    Ok(report)
}
