use std::io::{self, Write};

use crate::app::{AppError, Session};
use crate::basic::BasicOutcome;
use crate::circuit::{AcConfiguration, DcConfiguration, PanelView, ResistorList};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::request::CalculationType;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Basic,
    DcCircuit,
    AcCircuit,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_BASIC,
        keys::MAIN_MENU_DC,
        keys::MAIN_MENU_AC,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Basic),
            "2" => return Ok(MenuChoice::DcCircuit),
            "3" => return Ok(MenuChoice::AcCircuit),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 기본 계산 메뉴를 처리한다.
pub fn handle_basic(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::BASIC_HEADING));
    println!("{}", tr.t(keys::BASIC_TYPE_OPTIONS));
    let kind = loop {
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        let picked = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| CalculationType::ALL.get(i).copied());
        match picked {
            Some(kind) => break kind,
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let ctrl = &mut session.basic;
    ctrl.select_type(kind);
    for (slot, field) in kind.inputs().iter().enumerate() {
        let text = read_line(&format!("{}: ", field.label()))?;
        ctrl.set_input(kind, slot, text.trim());
    }
    ctrl.calculate(&session.backend);
    match ctrl.outcome() {
        Some(BasicOutcome::Success { value, formula }) => {
            println!("{value}");
            println!("{formula}");
        }
        Some(BasicOutcome::Failure(e)) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
        None => {}
    }
    Ok(())
}

/// DC 회로 메뉴를 처리한다.
pub fn handle_dc(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DC_HEADING));
    println!("{}", tr.t(keys::DC_CONFIG_OPTIONS));
    let config = match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => DcConfiguration::Series,
        "2" => DcConfiguration::Parallel,
        "3" => DcConfiguration::VoltageDivider,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    session.circuit.select_tab(crate::circuit::CircuitTab::Dc);
    let panel = &mut session.circuit.dc;
    panel.select_configuration(config);
    panel.voltage = read_line(&tr.t(keys::PROMPT_SOURCE_VOLTAGE))?.trim().to_string();
    if panel.is_resistor_group_visible() {
        let line = read_line(&tr.t(keys::PROMPT_RESISTORS))?;
        let texts: Vec<&str> = line.split(',').map(str::trim).collect();
        fill_resistors(&mut panel.resistors, &texts);
    } else {
        panel.r1 = read_line(&tr.t(keys::PROMPT_R1))?.trim().to_string();
        panel.r2 = read_line(&tr.t(keys::PROMPT_R2))?.trim().to_string();
    }
    session.circuit.solve_dc(&session.backend);
    print_view(tr, session.circuit.dc.view());
    Ok(())
}

/// AC 회로 메뉴를 처리한다.
pub fn handle_ac(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::AC_HEADING));
    println!("{}", tr.t(keys::AC_CONFIG_OPTIONS));
    let config = match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => AcConfiguration::Rc,
        "2" => AcConfiguration::Rl,
        "3" => AcConfiguration::Rlc,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    session.circuit.select_tab(crate::circuit::CircuitTab::Ac);
    let panel = &mut session.circuit.ac;
    panel.select_configuration(config);
    panel.voltage = read_line(&tr.t(keys::PROMPT_SOURCE_VOLTAGE))?.trim().to_string();
    panel.frequency = read_line(&tr.t(keys::PROMPT_FREQUENCY))?.trim().to_string();
    panel.resistance = read_line(&tr.t(keys::PROMPT_RESISTANCE))?.trim().to_string();
    if panel.is_capacitance_visible() {
        panel.capacitance = read_line(&tr.t(keys::PROMPT_CAPACITANCE))?.trim().to_string();
    }
    if panel.is_inductance_visible() {
        panel.inductance = read_line(&tr.t(keys::PROMPT_INDUCTANCE))?.trim().to_string();
    }
    session.circuit.solve_ac(&session.backend);
    print_view(tr, session.circuit.ac.view());
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_SERVER), cfg.server_url);
    let url = read_line(&tr.t(keys::SETTINGS_PROMPT_SERVER))?;
    if !url.trim().is_empty() {
        cfg.server_url = url.trim().to_string();
    }
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_string();
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 저항 목록을 주어진 입력 문자열들로 교체한다. 입력이 없으면 빈 한 행이 남는다.
fn fill_resistors(list: &mut ResistorList, texts: &[&str]) {
    while list.len() > 1 {
        let last = list.rows()[list.len() - 1].id;
        list.remove(last);
    }
    let first = list.rows()[0].id;
    list.set_value(first, texts.first().copied().unwrap_or(""));
    for text in texts.iter().skip(1) {
        let id = list.add();
        list.set_value(id, text);
    }
}

fn print_view(tr: &Translator, view: &PanelView) {
    if let Some(msg) = view.error_message() {
        println!("{}: {msg}", tr.t(keys::ERROR_PREFIX));
    }
    if let Some(report) = view.report() {
        println!();
        print!("{}", report.to_text());
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}
