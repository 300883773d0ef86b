#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use electrical_calculator::{
    backend::{CalculatorBackend, HttpBackend},
    basic::{BasicController, BasicOutcome},
    circuit::{
        AcConfiguration, AdvancedController, CircuitTab, DcConfiguration, PanelView, Submission,
    },
    config,
    error::RemoteError,
    i18n::{self, keys},
    report::Report,
    request::{CalculationRequest, CalculationType},
    response::{CalculationResponse, SolveResponse},
};
use image::GenericImageView;
use rfd::FileDialog;
use std::sync::mpsc::{self, Receiver, Sender};
use std::{env, fs, path::Path, thread};

/// 전기 계산기 GUI
#[derive(Parser)]
#[command(name = "electrical_calculator", version)]
struct Cli {
    /// 계산 서버 주소 (이번 실행에만 적용, config.toml보다 우선)
    #[arg(long)]
    server: Option<String>,

    /// 언어 코드: auto/ko/en
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
}

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default configuration");
        config::Config::default()
    });
    let lang = i18n::resolve_language(&cli.lang, Some(app_cfg.language.as_str()));
    let server_override = cli.server;
    eframe::run_native(
        "Electrical Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(
                app_cfg,
                &lang,
                server_override,
                cc.egui_ctx.clone(),
            ))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글과 Ω/μ 기호를 표시하기 위해 시스템 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) Windows/macOS/Linux 시스템 폰트
/// 3) 모두 실패 시 Err를 반환하고 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NotoSansKR-Regular.ttf".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    candidates.extend(
        [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        ]
        .map(std::path::PathBuf::from),
    );
    for path in candidates {
        if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;
            apply_font_bytes(ctx, bytes, "ui_font");
            return Ok(());
        }
    }
    Err("No CJK font found; Korean labels may not render.".into())
}

/// 작업 스레드가 돌려주는 서버 응답.
enum Completion {
    Basic(CalculationRequest, Result<CalculationResponse, RemoteError>),
    Circuit(Submission, Result<SolveResponse, RemoteError>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Basic,
    Circuit,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    backend: HttpBackend,
    server_override: Option<String>,
    ctx: egui::Context,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    page: Page,
    basic: BasicController,
    circuit: AdvancedController,
    export_status: Option<String>,
    // 설정
    show_settings_modal: bool,
    server_input: String,
    lang_input: String,
    window_alpha: f32,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(
        config: config::Config,
        lang: &str,
        server_override: Option<String>,
        ctx: egui::Context,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tr: i18n::Translator::new_with_pack(lang, config.language_pack_dir.as_deref()),
            backend: HttpBackend::new(server_override.as_deref().unwrap_or(&config.server_url)),
            server_override,
            ctx,
            tx,
            rx,
            page: Page::Basic,
            basic: BasicController::new(),
            circuit: AdvancedController::new(),
            export_status: None,
            show_settings_modal: false,
            server_input: config.server_url.clone(),
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha,
            settings_status: None,
            config,
        }
    }

    /// 도착한 응답을 도착 순서대로 반영한다. 겹친 요청은 마지막 응답이 화면에 남는다.
    fn poll_completions(&mut self) {
        while let Ok(done) = self.rx.try_recv() {
            match done {
                Completion::Basic(request, response) => self.basic.complete(&request, response),
                Completion::Circuit(submission, response) => {
                    self.circuit.complete(&submission, response)
                }
            }
        }
    }

    fn submit_basic(&mut self) {
        let Ok(request) = self.basic.prepare() else {
            return;
        };
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let response = backend.calculate(&request);
            let _ = tx.send(Completion::Basic(request, response));
            ctx.request_repaint();
        });
    }

    fn submit_circuit(&mut self, tab: CircuitTab) {
        let prepared = match tab {
            CircuitTab::Dc => self.circuit.dc.prepare(),
            CircuitTab::Ac => self.circuit.ac.prepare(),
        };
        let Ok(submission) = prepared else {
            return;
        };
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let response = backend.solve_circuit(&submission.request);
            let _ = tx.send(Completion::Circuit(submission, response));
            ctx.request_repaint();
        });
    }

    fn export_report(&mut self, report: &Report, title: &str) {
        let Some(path) = FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name("circuit-report.html")
            .save_file()
        else {
            return;
        };
        self.export_status = Some(match fs::write(&path, report.to_html_document(title)) {
            Ok(()) => format!("{} {}", self.tr.t(keys::EXPORTED), path.display()),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn apply_settings(&mut self) {
        let server_url = self.server_input.trim().to_string();
        if server_url != self.config.server_url {
            self.server_override = None;
        }
        self.config.server_url = server_url;
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.backend = HttpBackend::new(
            self.server_override
                .as_deref()
                .unwrap_or(&self.config.server_url),
        );
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
            Err(e) => format!("Save error: {e}"),
        });
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        for (page, label) in [
            (Page::Basic, self.tr.t(keys::NAV_BASIC)),
            (Page::Circuit, self.tr.t(keys::NAV_CIRCUIT)),
        ] {
            let selected = self.page == page;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.page = page;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_basic(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::NAV_BASIC));
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            let mut selected = self.basic.selected();
            ui.horizontal(|ui| {
                ui.label(self.tr.t(keys::BASIC_TYPE_LABEL));
                egui::ComboBox::from_id_source("calc_type")
                    .selected_text(type_label(selected))
                    .show_ui(ui, |ui| {
                        for kind in CalculationType::ALL {
                            ui.selectable_value(&mut selected, kind, type_label(kind));
                        }
                    });
            });
            if selected != self.basic.selected() {
                self.basic.select_type(selected);
            }
            ui.add_space(6.0);
            for kind in CalculationType::ALL {
                if !self.basic.is_group_visible(kind) {
                    continue;
                }
                egui::Grid::new(("basic_fields", kind.as_str()))
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for (slot, field) in kind.inputs().iter().enumerate() {
                            if let Some(text) = self.basic.input_mut(kind, slot) {
                                ui.label(field.label());
                                ui.text_edit_singleline(text);
                                ui.end_row();
                            }
                        }
                    });
            }
            ui.add_space(8.0);
            if ui.button(self.tr.t(keys::BASIC_CALCULATE)).clicked() {
                self.submit_basic();
            }
            match self.basic.outcome() {
                Some(BasicOutcome::Success { value, formula }) => {
                    ui.separator();
                    ui.heading(value);
                    ui.label(formula);
                }
                Some(BasicOutcome::Failure(e)) => {
                    ui.colored_label(error_color(), e.to_string());
                }
                None => {}
            }
        });
    }

    fn ui_circuit(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (tab, label) in [
                (CircuitTab::Dc, self.tr.t(keys::TAB_DC)),
                (CircuitTab::Ac, self.tr.t(keys::TAB_AC)),
            ] {
                if ui
                    .selectable_label(self.circuit.is_active(tab), label)
                    .clicked()
                {
                    self.circuit.select_tab(tab);
                }
            }
        });
        ui.separator();
        match self.circuit.tab() {
            CircuitTab::Dc => self.ui_dc(ui),
            CircuitTab::Ac => self.ui_ac(ui),
        }
    }

    fn ui_dc(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let panel = &mut self.circuit.dc;
        let mut config = panel.configuration();
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::CONFIGURATION));
            egui::ComboBox::from_id_source("dc_config")
                .selected_text(config.label())
                .show_ui(ui, |ui| {
                    for c in DcConfiguration::ALL {
                        ui.selectable_value(&mut config, c, c.label());
                    }
                });
        });
        if config != panel.configuration() {
            panel.select_configuration(config);
        }
        egui::Grid::new("dc_source")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Voltage Source (V)");
                ui.text_edit_singleline(&mut panel.voltage);
                ui.end_row();
            });
        if panel.is_resistor_group_visible() {
            ui.label(tr.t(keys::RESISTORS));
            let mut remove = None;
            for row in panel.resistors.rows_mut() {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut row.value).hint_text("Resistance in Ohms"),
                    );
                    if ui.button("✕").clicked() {
                        remove = Some(row.id);
                    }
                });
            }
            if let Some(id) = remove {
                panel.resistors.remove(id);
            }
            if ui.button(tr.t(keys::ADD_RESISTOR)).clicked() {
                panel.resistors.add();
            }
        }
        if panel.is_divider_group_visible() {
            egui::Grid::new("dc_divider")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("R1 (Ω)");
                    ui.text_edit_singleline(&mut panel.r1);
                    ui.end_row();
                    ui.label("R2 (Ω)");
                    ui.text_edit_singleline(&mut panel.r2);
                    ui.end_row();
                });
        }
        ui.add_space(8.0);
        if ui.button(tr.t(keys::SOLVE)).clicked() {
            self.submit_circuit(CircuitTab::Dc);
        }
        if panel_view_ui(ui, &tr, self.circuit.dc.view(), "dc") {
            if let Some(report) = self.circuit.dc.view().report().cloned() {
                self.export_report(&report, "DC Circuit Analysis");
            }
        }
    }

    fn ui_ac(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let panel = &mut self.circuit.ac;
        let mut config = panel.configuration();
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::CONFIGURATION));
            egui::ComboBox::from_id_source("ac_config")
                .selected_text(config.label())
                .show_ui(ui, |ui| {
                    for c in AcConfiguration::ALL {
                        ui.selectable_value(&mut config, c, c.label());
                    }
                });
        });
        if config != panel.configuration() {
            panel.select_configuration(config);
        }
        let show_c = panel.is_capacitance_visible();
        let show_l = panel.is_inductance_visible();
        egui::Grid::new("ac_fields")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Voltage Source (V rms)");
                ui.text_edit_singleline(&mut panel.voltage);
                ui.end_row();
                ui.label("Frequency (Hz)");
                ui.text_edit_singleline(&mut panel.frequency);
                ui.end_row();
                ui.label("Resistance (Ω)");
                ui.text_edit_singleline(&mut panel.resistance);
                ui.end_row();
                if show_c {
                    ui.label("Capacitance (μF)");
                    ui.text_edit_singleline(&mut panel.capacitance);
                    ui.end_row();
                }
                if show_l {
                    ui.label("Inductance (mH)");
                    ui.text_edit_singleline(&mut panel.inductance);
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        if ui.button(tr.t(keys::SOLVE)).clicked() {
            self.submit_circuit(CircuitTab::Ac);
        }
        if panel_view_ui(ui, &tr, self.circuit.ac.view(), "ac") {
            if let Some(report) = self.circuit.ac.view().report().cloned() {
                self.export_report(&report, "AC Circuit Analysis");
            }
        }
    }

    fn ui_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let title = self.tr.t(keys::SETTINGS_TITLE);
        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Server URL");
                ui.text_edit_singleline(&mut self.server_input);
                ui.separator();
                ui.label(self.tr.t(keys::SETTINGS_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                if ui.button(self.tr.t(keys::SETTINGS_SAVE)).clicked() {
                    self.apply_settings();
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }
}

/// 로딩/오류/결과 영역. 내보내기 버튼이 눌리면 `true`.
fn panel_view_ui(ui: &mut egui::Ui, tr: &i18n::Translator, view: &PanelView, id: &str) -> bool {
    if view.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(tr.t(keys::LOADING));
        });
    }
    if let Some(msg) = view.error_message() {
        ui.colored_label(error_color(), msg);
    }
    let Some(report) = view.report() else {
        return false;
    };
    ui.separator();
    egui::Grid::new((id, "summary"))
        .num_columns(2)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for row in &report.summary {
                ui.strong(&row.label);
                ui.label(&row.value);
                ui.end_row();
            }
        });
    if let Some(table) = &report.components {
        ui.add_space(6.0);
        ui.strong("Individual Components:");
        egui::Grid::new((id, "components"))
            .num_columns(table.headers.len())
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for header in &table.headers {
                    ui.strong(header);
                }
                ui.end_row();
                for cells in &table.rows {
                    for cell in cells {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    }
    ui.add_space(6.0);
    ui.strong(tr.t(keys::FORMULAS));
    for (label, formula) in &report.formulas {
        ui.label(format!("• {label}: {formula}"));
    }
    ui.add_space(6.0);
    ui.button(tr.t(keys::EXPORT_HTML)).clicked()
}

fn type_label(kind: CalculationType) -> &'static str {
    match kind {
        CalculationType::Power => "Power (P = V × I)",
        CalculationType::Resistance => "Resistance (R = V / I)",
        CalculationType::Voltage => "Voltage (V = P / I)",
        CalculationType::Current => "Current (I = P / V)",
        CalculationType::Energy => "Energy (W = P × t)",
    }
}

fn error_color() -> egui::Color32 {
    egui::Color32::from_rgb(200, 60, 60)
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_completions();

        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                ui.label(self.backend.base_url());
                ui.separator();
                if ui.button("⚙").clicked() {
                    self.show_settings_modal = true;
                }
                if let Some(msg) = &self.export_status {
                    ui.separator();
                    ui.label(msg);
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings_window(ctx);
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.page {
                    Page::Basic => self.ui_basic(ui),
                    Page::Circuit => self.ui_circuit(ui),
                });
        });
    }
}
