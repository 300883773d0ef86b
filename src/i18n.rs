use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_BASIC: &str = "main_menu.basic";
    pub const MAIN_MENU_DC: &str = "main_menu.dc";
    pub const MAIN_MENU_AC: &str = "main_menu.ac";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const BASIC_HEADING: &str = "basic.heading";
    pub const BASIC_TYPE_OPTIONS: &str = "basic.type_options";
    pub const BASIC_CALCULATE: &str = "basic.calculate";
    pub const BASIC_TYPE_LABEL: &str = "basic.type_label";

    pub const DC_HEADING: &str = "dc.heading";
    pub const DC_CONFIG_OPTIONS: &str = "dc.config_options";
    pub const PROMPT_SOURCE_VOLTAGE: &str = "prompt.source_voltage";
    pub const PROMPT_RESISTORS: &str = "prompt.resistors";
    pub const PROMPT_R1: &str = "prompt.r1";
    pub const PROMPT_R2: &str = "prompt.r2";

    pub const AC_HEADING: &str = "ac.heading";
    pub const AC_CONFIG_OPTIONS: &str = "ac.config_options";
    pub const PROMPT_FREQUENCY: &str = "prompt.frequency";
    pub const PROMPT_RESISTANCE: &str = "prompt.resistance";
    pub const PROMPT_CAPACITANCE: &str = "prompt.capacitance";
    pub const PROMPT_INDUCTANCE: &str = "prompt.inductance";

    pub const CONFIGURATION: &str = "circuit.configuration";
    pub const SOLVE: &str = "circuit.solve";
    pub const ADD_RESISTOR: &str = "circuit.add_resistor";
    pub const RESISTORS: &str = "circuit.resistors";
    pub const FORMULAS: &str = "circuit.formulas";
    pub const LOADING: &str = "circuit.loading";
    pub const EXPORT_HTML: &str = "circuit.export_html";
    pub const EXPORTED: &str = "circuit.exported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_SERVER: &str = "settings.current_server";
    pub const SETTINGS_PROMPT_SERVER: &str = "settings.prompt_server";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_ALPHA: &str = "settings.alpha";
    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const NAV_BASIC: &str = "nav.basic";
    pub const NAV_CIRCUIT: &str = "nav.circuit";
    pub const TAB_DC: &str = "tab.dc";
    pub const TAB_AC: &str = "tab.ac";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며, 한국어 번역이 없으면 영어로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let text = match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        };
        text.to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "전기 계산기",
        MAIN_MENU_TITLE => "\n=== 전기 계산기 ===",
        MAIN_MENU_BASIC => "1) 기본 계산 (전력/저항/전압/전류/에너지)",
        MAIN_MENU_DC => "2) DC 회로 풀이",
        MAIN_MENU_AC => "3) AC 회로 풀이",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        BASIC_HEADING => "\n-- 기본 계산 --",
        BASIC_TYPE_OPTIONS => "1) 전력  2) 저항  3) 전압  4) 전류  5) 에너지",
        BASIC_CALCULATE => "계산",
        BASIC_TYPE_LABEL => "계산 종류",
        DC_HEADING => "\n-- DC 회로 --",
        DC_CONFIG_OPTIONS => "1) 직렬  2) 병렬  3) 분압기",
        PROMPT_SOURCE_VOLTAGE => "전원 전압 [V]: ",
        PROMPT_RESISTORS => "저항 값 [Ω] (쉼표로 구분): ",
        PROMPT_R1 => "R1 [Ω]: ",
        PROMPT_R2 => "R2 [Ω]: ",
        AC_HEADING => "\n-- AC 회로 --",
        AC_CONFIG_OPTIONS => "1) RC  2) RL  3) RLC",
        PROMPT_FREQUENCY => "주파수 [Hz]: ",
        PROMPT_RESISTANCE => "저항 [Ω]: ",
        PROMPT_CAPACITANCE => "커패시턴스 [μF]: ",
        PROMPT_INDUCTANCE => "인덕턴스 [mH]: ",
        CONFIGURATION => "회로 구성",
        SOLVE => "풀이",
        ADD_RESISTOR => "저항 추가",
        RESISTORS => "저항 목록",
        FORMULAS => "사용된 공식",
        LOADING => "계산 중...",
        EXPORT_HTML => "HTML로 저장",
        EXPORTED => "저장했습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_SERVER => "현재 계산 서버:",
        SETTINGS_PROMPT_SERVER => "새 서버 주소(유지하려면 엔터): ",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 auto/ko/en (유지하려면 엔터): ",
        SETTINGS_ALPHA => "창 투명도",
        SETTINGS_TITLE => "설정",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_SAVED => "저장되었습니다.",
        NAV_BASIC => "기본 계산기",
        NAV_CIRCUIT => "회로 풀이",
        TAB_DC => "DC 회로",
        TAB_AC => "AC 회로",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Electrical Calculator",
        MAIN_MENU_TITLE => "\n=== Electrical Calculator ===",
        MAIN_MENU_BASIC => "1) Basic calculation (power/resistance/voltage/current/energy)",
        MAIN_MENU_DC => "2) DC circuit solver",
        MAIN_MENU_AC => "3) AC circuit solver",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        BASIC_HEADING => "\n-- Basic Calculation --",
        BASIC_TYPE_OPTIONS => "1) Power  2) Resistance  3) Voltage  4) Current  5) Energy",
        BASIC_CALCULATE => "Calculate",
        BASIC_TYPE_LABEL => "Calculation type",
        DC_HEADING => "\n-- DC Circuit --",
        DC_CONFIG_OPTIONS => "1) Series  2) Parallel  3) Voltage divider",
        PROMPT_SOURCE_VOLTAGE => "Source voltage [V]: ",
        PROMPT_RESISTORS => "Resistances [Ω] (comma separated): ",
        PROMPT_R1 => "R1 [Ω]: ",
        PROMPT_R2 => "R2 [Ω]: ",
        AC_HEADING => "\n-- AC Circuit --",
        AC_CONFIG_OPTIONS => "1) RC  2) RL  3) RLC",
        PROMPT_FREQUENCY => "Frequency [Hz]: ",
        PROMPT_RESISTANCE => "Resistance [Ω]: ",
        PROMPT_CAPACITANCE => "Capacitance [μF]: ",
        PROMPT_INDUCTANCE => "Inductance [mH]: ",
        CONFIGURATION => "Configuration",
        SOLVE => "Solve",
        ADD_RESISTOR => "Add resistor",
        RESISTORS => "Resistors",
        FORMULAS => "Formulas used",
        LOADING => "Calculating...",
        EXPORT_HTML => "Export HTML",
        EXPORTED => "Saved:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_SERVER => "Current calculation server:",
        SETTINGS_PROMPT_SERVER => "New server URL (enter to keep): ",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_LANGUAGE => "Language code auto/ko/en (enter to keep): ",
        SETTINGS_ALPHA => "Window transparency",
        SETTINGS_TITLE => "Settings",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_SAVED => "Saved.",
        NAV_BASIC => "Basic Calculator",
        NAV_CIRCUIT => "Circuit Solver",
        TAB_DC => "DC Circuit",
        TAB_AC => "AC Circuit",
        _ => "[missing translation]",
    }
}
