mod common;

use common::{server_error, FakeBackend};
use electrical_calculator::{
    circuit::{AcConfiguration, AdvancedController, CircuitTab, DcConfiguration, ResistorList},
    error::RemoteError,
};
use serde_json::json;

fn fill(list: &mut ResistorList, values: &[&str]) {
    let first = list.rows()[0].id;
    list.set_value(first, values[0]);
    for v in &values[1..] {
        let id = list.add();
        list.set_value(id, v);
    }
}

fn component_rows(ctrl: &AdvancedController) -> Vec<String> {
    ctrl.dc
        .view()
        .report()
        .and_then(|r| r.components.as_ref())
        .map(|t| t.rows.iter().map(|cells| cells.join(" | ")).collect())
        .unwrap_or_default()
}

#[test]
fn tabs_are_mutually_exclusive() {
    let mut ctrl = AdvancedController::new();
    assert_eq!(ctrl.tab(), CircuitTab::Dc);
    for tab in [CircuitTab::Ac, CircuitTab::Dc, CircuitTab::Ac] {
        ctrl.select_tab(tab);
        assert!(ctrl.is_active(tab));
        assert_eq!(
            [CircuitTab::Dc, CircuitTab::Ac]
                .into_iter()
                .filter(|t| ctrl.is_active(*t))
                .count(),
            1
        );
    }
}

#[test]
fn dc_groups_follow_configuration() {
    let mut ctrl = AdvancedController::new();
    assert_eq!(ctrl.dc.configuration(), DcConfiguration::Series);
    assert!(ctrl.dc.is_resistor_group_visible());
    ctrl.dc.select_configuration(DcConfiguration::VoltageDivider);
    assert!(ctrl.dc.is_divider_group_visible());
    assert!(!ctrl.dc.is_resistor_group_visible());
    ctrl.dc.select_configuration(DcConfiguration::Parallel);
    assert!(ctrl.dc.is_resistor_group_visible());
    assert!(!ctrl.dc.is_divider_group_visible());
}

#[test]
fn resistor_rows_add_and_remove() {
    let mut list = ResistorList::new();
    assert_eq!(list.len(), 1);
    let only = list.rows()[0].id;
    assert!(!list.remove(only));
    assert_eq!(list.len(), 1);

    let second = list.add();
    let third = list.add();
    list.set_value(only, "10");
    list.set_value(second, "oops");
    list.set_value(third, "30");
    assert_eq!(list.values(), vec![10.0, 30.0]);

    assert!(list.remove(second));
    assert!(!list.remove(second));
    assert_eq!(list.len(), 2);
    assert_eq!(list.values(), vec![10.0, 30.0]);
}

#[test]
fn series_end_to_end() {
    let backend = FakeBackend::new().solve_json(json!({
        "results": {
            "total_resistance": 30.0,
            "current": 0.4,
            "total_power": 4.8,
            "voltage_drops": [4.0, 8.0],
            "powers": [1.6, 3.2]
        },
        "formulas": {
            "total_resistance": "Rtotal = R1 + R2 + ... + Rn",
            "current": "I = V / Rtotal",
            "voltage_drops": "Vn = I × Rn"
        }
    }));
    let mut ctrl = AdvancedController::new();
    ctrl.dc.voltage = "12".into();
    fill(&mut ctrl.dc.resistors, &["10", "20"]);
    ctrl.solve_dc(&backend);

    assert_eq!(
        backend.last_request(),
        Some(json!({
            "circuit_type": "dc",
            "configuration": "series",
            "voltage_source": 12.0,
            "resistances": [10.0, 20.0]
        }))
    );
    let view = ctrl.dc.view();
    assert!(!view.is_loading());
    let report = view.report().expect("report");
    assert_eq!(report.find("Total Resistance"), Some("30.000 Ω"));
    assert_eq!(report.find("Circuit Current"), Some("0.400 A"));
    assert_eq!(report.find("Total Power"), Some("4.800 W"));
    assert_eq!(
        component_rows(&ctrl),
        vec!["R1 | 10.000 | 4.000 | 1.600", "R2 | 20.000 | 8.000 | 3.200"]
    );
    let labels: Vec<&str> = report.formulas.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["total_resistance", "current", "voltage_drops"]);
    assert!(view.formulas_html().unwrap_or_default().starts_with(
        "<ul><li><strong>total_resistance:</strong> Rtotal = R1 + R2 + ... + Rn</li>"
    ));
}

#[test]
fn parallel_skips_invalid_rows_and_uses_current_column() {
    let backend = FakeBackend::new().solve_json(json!({
        "results": {
            "total_resistance": 5.0,
            "total_current": 2.0,
            "total_power": 20.0,
            "branch_currents": [1.0, 1.0],
            "powers": [10.0, 10.0],
            "resistances": [10.0, 10.0]
        },
        "formulas": {}
    }));
    let mut ctrl = AdvancedController::new();
    ctrl.dc.select_configuration(DcConfiguration::Parallel);
    ctrl.dc.voltage = "10".into();
    fill(&mut ctrl.dc.resistors, &["10", "", "x", "10"]);
    ctrl.solve_dc(&backend);

    assert_eq!(
        backend.last_request(),
        Some(json!({
            "circuit_type": "dc",
            "configuration": "parallel",
            "voltage_source": 10.0,
            "resistances": [10.0, 10.0]
        }))
    );
    let report = ctrl.dc.view().report().expect("report");
    assert_eq!(report.find("Total Current"), Some("2.000 A"));
    let table = report.components.as_ref().expect("components");
    assert_eq!(table.headers[2], "Current (A)");
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn no_resistances_is_rejected_locally() {
    let backend = FakeBackend::new();
    let mut ctrl = AdvancedController::new();
    ctrl.dc.voltage = "12".into();
    fill(&mut ctrl.dc.resistors, &["", "abc"]);
    ctrl.solve_dc(&backend);
    assert_eq!(backend.calls(), 0);
    assert!(!ctrl.dc.view().is_loading());
    assert_eq!(
        ctrl.dc.view().error_message().as_deref(),
        Some("Please enter at least one resistance value")
    );
}

#[test]
fn divider_echoes_raw_input_voltage() {
    let backend = FakeBackend::new().solve_json(json!({
        "results": {
            "output_voltage": 4.5,
            "total_resistance": 2000.0,
            "current": 0.005,
            "power_r1": 0.02,
            "power_r2": 0.025,
            "total_power": 0.045
        },
        "formulas": {"output_voltage": "Vout = Vin × R2 / (R1 + R2)"}
    }));
    let mut ctrl = AdvancedController::new();
    ctrl.dc.select_configuration(DcConfiguration::VoltageDivider);
    ctrl.dc.voltage = "9.0".into();
    ctrl.dc.r1 = "1000".into();
    ctrl.dc.r2 = "1000".into();
    ctrl.solve_dc(&backend);

    assert_eq!(
        backend.last_request(),
        Some(json!({
            "circuit_type": "dc",
            "configuration": "voltage_divider",
            "voltage_source": 9.0,
            "r1": 1000.0,
            "r2": 1000.0
        }))
    );
    let report = ctrl.dc.view().report().expect("report");
    let rows: Vec<(&str, &str)> = report
        .summary
        .iter()
        .map(|r| (r.label.as_str(), r.value.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Input Voltage", "9.0 V"),
            ("Output Voltage (across R2)", "4.500 V"),
            ("Current", "0.005 A"),
            ("Total Resistance", "2000.000 Ω"),
            ("Power through R1", "0.020 W"),
            ("Power through R2", "0.025 W"),
            ("Total Power", "0.045 W"),
        ]
    );
    assert!(report.components.is_none());
}

#[test]
fn ac_rejects_non_positive_frequency_without_calling() {
    let backend = FakeBackend::new();
    let mut ctrl = AdvancedController::new();
    ctrl.select_tab(CircuitTab::Ac);
    ctrl.ac.voltage = "120".into();
    ctrl.ac.frequency = "0".into();
    ctrl.ac.resistance = "100".into();
    ctrl.ac.capacitance = "10".into();
    ctrl.solve_ac(&backend);
    assert_eq!(backend.calls(), 0);
    assert_eq!(
        ctrl.ac.view().error_message().as_deref(),
        Some("Frequency must be greater than 0")
    );

    ctrl.ac.frequency = "-60".into();
    ctrl.solve_ac(&backend);
    assert_eq!(backend.calls(), 0);
}

#[test]
fn ac_requires_component_values_for_configuration() {
    let backend = FakeBackend::new();
    let mut ctrl = AdvancedController::new();
    ctrl.ac.voltage = "120".into();
    ctrl.ac.frequency = "60".into();
    ctrl.ac.resistance = "100".into();
    ctrl.ac.capacitance = "0".into();
    ctrl.solve_ac(&backend);
    assert_eq!(
        ctrl.ac.view().error_message().as_deref(),
        Some("Please enter a valid capacitance value greater than 0")
    );

    ctrl.ac.select_configuration(AcConfiguration::Rl);
    ctrl.solve_ac(&backend);
    assert_eq!(
        ctrl.ac.view().error_message().as_deref(),
        Some("Please enter a valid inductance value greater than 0")
    );
    assert_eq!(backend.calls(), 0);
}

#[test]
fn ac_rc_end_to_end() {
    let backend = FakeBackend::new().solve_json(json!({
        "results": {
            "impedance": 282.84,
            "phase_angle": -69.34,
            "current": 0.4243,
            "power_factor": 0.3536,
            "real_power": 18.0,
            "reactive_power": -47.6,
            "apparent_power": 50.9,
            "time_constant": 0.001,
            "voltage_r": 42.43,
            "voltage_c": 112.5
        },
        "formulas": {"impedance": "Z = √(R² + Xc²)"}
    }));
    let mut ctrl = AdvancedController::new();
    ctrl.select_tab(CircuitTab::Ac);
    ctrl.ac.voltage = "120".into();
    ctrl.ac.frequency = "60".into();
    ctrl.ac.resistance = "100".into();
    ctrl.ac.capacitance = "10".into();
    ctrl.solve_ac(&backend);

    assert_eq!(
        backend.last_request(),
        Some(json!({
            "circuit_type": "ac",
            "configuration": "rc",
            "voltage_source": 120.0,
            "frequency": 60.0,
            "resistance": 100.0,
            "capacitance": 10.0
        }))
    );
    let report = ctrl.ac.view().report().expect("report");
    assert_eq!(report.find("Impedance (Z)"), Some("282.840 Ω"));
    assert_eq!(report.find("Phase Angle"), Some("-69.34°"));
    assert_eq!(report.find("Reactive Power (Q)"), Some("-47.600 VAR"));
    assert_eq!(report.find("Time Constant (τ)"), Some("0.001000 s"));
    assert_eq!(report.find("Voltage across Capacitor"), Some("112.500 V"));
    assert!(report.find("Resonant Frequency").is_none());
}

#[test]
fn ac_rl_end_to_end() {
    let backend = FakeBackend::new().solve_json(json!({
        "results": {
            "impedance": 103.7,
            "phase_angle": 15.27,
            "current": 1.157,
            "power_factor": 0.964,
            "real_power": 133.9,
            "reactive_power": 36.6,
            "apparent_power": 138.8,
            "time_constant": 0.0001,
            "voltage_r": 115.7,
            "voltage_l": 31.6
        },
        "formulas": {"inductive_reactance": "XL = 2πfL", "impedance": "Z = √(R² + XL²)"}
    }));
    let mut ctrl = AdvancedController::new();
    ctrl.select_tab(CircuitTab::Ac);
    ctrl.ac.select_configuration(AcConfiguration::Rl);
    ctrl.ac.voltage = "120".into();
    ctrl.ac.frequency = "50".into();
    ctrl.ac.resistance = "100".into();
    ctrl.ac.inductance = "10".into();
    ctrl.solve_ac(&backend);

    assert_eq!(
        backend.last_request(),
        Some(json!({
            "circuit_type": "ac",
            "configuration": "rl",
            "voltage_source": 120.0,
            "frequency": 50.0,
            "resistance": 100.0,
            "inductance": 10.0
        }))
    );
    let report = ctrl.ac.view().report().expect("report");
    let labels: Vec<&str> = report.summary.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Impedance (Z)",
            "Phase Angle",
            "Current",
            "Power Factor",
            "Real Power (P)",
            "Reactive Power (Q)",
            "Apparent Power (S)",
            "Time Constant (τ)",
            "Voltage across Resistor",
            "Voltage across Inductor",
        ]
    );
    assert_eq!(report.find("Phase Angle"), Some("15.27°"));
    assert_eq!(report.find("Time Constant (τ)"), Some("0.000100 s"));
    assert_eq!(report.find("Voltage across Inductor"), Some("31.600 V"));
    assert!(report.find("Voltage across Capacitor").is_none());
    let formula_labels: Vec<&str> = report.formulas.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(formula_labels, vec!["inductive_reactance", "impedance"]);
}

#[test]
fn ac_rlc_shows_resonance_and_no_time_constant() {
    let backend = FakeBackend::new().solve_json(json!({
        "results": {
            "impedance": 100.0,
            "phase_angle": 0.0,
            "current": 1.2,
            "power_factor": 1.0,
            "real_power": 144.0,
            "reactive_power": 0.0,
            "apparent_power": 144.0,
            "voltage_r": 120.0,
            "voltage_l": 45.2,
            "voltage_c": 45.2,
            "resonant_frequency": 159.155
        },
        "formulas": {}
    }));
    let mut ctrl = AdvancedController::new();
    ctrl.ac.select_configuration(AcConfiguration::Rlc);
    ctrl.ac.voltage = "120".into();
    ctrl.ac.frequency = "159.155".into();
    ctrl.ac.resistance = "100".into();
    ctrl.ac.capacitance = "10".into();
    ctrl.ac.inductance = "100".into();
    ctrl.solve_ac(&backend);

    let request = backend.last_request().expect("request sent");
    assert_eq!(request["configuration"], "rlc");
    assert_eq!(request["inductance"], 100.0);
    let report = ctrl.ac.view().report().expect("report");
    assert_eq!(report.find("Resonant Frequency"), Some("159.155 Hz"));
    assert_eq!(report.find("Voltage across Inductor"), Some("45.200 V"));
    assert!(report.find("Time Constant (τ)").is_none());
}

#[test]
fn loading_cleared_on_every_remote_failure() {
    let backend = FakeBackend::new()
        .reply_solve(Err(server_error(Some("Invalid circuit configuration"))))
        .reply_solve(Err(server_error(None)))
        .reply_solve(Err(RemoteError::Transport("connection refused".into())))
        .solve_json(json!({"results": {"current": 1.0}, "formulas": {}}));
    let mut ctrl = AdvancedController::new();
    ctrl.dc.voltage = "12".into();
    fill(&mut ctrl.dc.resistors, &["10"]);

    let expected = [
        "Invalid circuit configuration",
        "An error occurred during calculation",
        "connection refused",
    ];
    for message in expected {
        ctrl.solve_dc(&backend);
        assert!(!ctrl.dc.view().is_loading());
        assert!(ctrl.dc.view().report().is_none());
        assert_eq!(ctrl.dc.view().error_message().as_deref(), Some(message));
    }

    // 필드가 빠진 응답은 디코드 오류로 표시된다
    ctrl.solve_dc(&backend);
    assert!(!ctrl.dc.view().is_loading());
    let message = ctrl.dc.view().error_message().unwrap_or_default();
    assert!(message.starts_with("Malformed response"), "{message}");
    assert_eq!(backend.calls(), 4);
}

#[test]
fn completion_is_routed_to_submitting_panel() {
    let mut ctrl = AdvancedController::new();
    ctrl.dc.voltage = "12".into();
    fill(&mut ctrl.dc.resistors, &["10"]);
    let submission = ctrl.dc.prepare().expect("valid dc input");
    assert!(ctrl.dc.view().is_loading());

    // 응답이 오기 전에 AC 탭으로 넘어가도 DC 패널에 반영된다
    ctrl.select_tab(CircuitTab::Ac);
    ctrl.complete(&submission, Err(server_error(Some("boom"))));
    assert!(!ctrl.dc.view().is_loading());
    assert_eq!(ctrl.dc.view().error_message().as_deref(), Some("boom"));
    assert!(ctrl.ac.view().error().is_none());
}
