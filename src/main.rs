use clap::Parser;
use electrical_calculator::{app, config, i18n};

/// 전기 계산기 대화형 CLI
#[derive(Parser)]
#[command(name = "electrical_calculator_cli", version)]
struct Cli {
    /// 계산 서버 주소 (config.toml보다 우선)
    #[arg(long)]
    server: Option<String>,

    /// 언어 코드: auto/ko/en
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    app::run(&mut cfg, &mut tr, cli.server)?;
    Ok(())
}
