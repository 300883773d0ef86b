use thiserror::Error;

use crate::backend::HttpBackend;
use crate::basic::BasicController;
use crate::circuit::AdvancedController;
use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// CLI 세션 동안 유지되는 컨트롤러들. 메뉴를 오가도 입력값이 남는다.
pub struct Session {
    pub backend: HttpBackend,
    pub basic: BasicController,
    pub circuit: AdvancedController,
}

impl Session {
    /// `server_override`가 있으면 설정 파일의 주소 대신 그것으로 접속한다.
    pub fn new(config: &Config, server_override: Option<&str>) -> Self {
        Self {
            backend: HttpBackend::new(server_override.unwrap_or(&config.server_url)),
            basic: BasicController::new(),
            circuit: AdvancedController::new(),
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// `server_override`는 이번 실행에만 적용되며 `config.toml`에는 저장되지 않는다.
/// 설정 메뉴에서 서버 주소를 새로 입력하면 그 값이 우선한다.
pub fn run(
    config: &mut Config,
    tr: &mut Translator,
    mut server_override: Option<String>,
) -> Result<(), AppError> {
    let mut session = Session::new(config, server_override.as_deref());
    tracing::info!(server = session.backend.base_url(), "cli session started");
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Basic => ui_cli::handle_basic(tr, &mut session)?,
            MenuChoice::DcCircuit => ui_cli::handle_dc(tr, &mut session)?,
            MenuChoice::AcCircuit => ui_cli::handle_ac(tr, &mut session)?,
            MenuChoice::Settings => {
                let previous_url = config.server_url.clone();
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                if config.server_url != previous_url {
                    server_override = None;
                }
                let resolved = i18n::resolve_language(&config.language, None);
                *tr = Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
                session.backend =
                    HttpBackend::new(server_override.as_deref().unwrap_or(&config.server_url));
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
