use std::io::{self, BufRead};
use std::path::Path;

use thiserror::Error;

use crate::air::{self, FormFields, ProcessError, ProcessInput};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::report;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 공조 계산 오류
    #[error("calculation error: {0}")]
    Process(#[from] ProcessError),
    /// 표준 입력이 닫힘(EOF)
    #[error("end of input")]
    EndOfInput,
}

/// 폼 원문을 파싱해 계산하고 보고서 문자열을 만든다.
///
/// 입력/물리 영역 오류는 계산을 시작하지 않거나 중단하고 그대로 돌려준다.
pub fn calculate_report(
    fields: &FormFields,
    config: &Config,
    tr: &Translator,
) -> Result<String, ProcessError> {
    let input = ProcessInput::parse(fields)?;
    let result = air::compute_process(&input, &config.process)?;
    log::info!(
        target: "app",
        "calculated: cooling {:.2} kW, reheat {:.2} kW",
        result.cooling_duty_kw,
        result.reheat_duty_kw
    );
    Ok(report::format_report(&result, tr))
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 언어를 바꾸면 `config_path`(세션을 불러온 파일)에 다시 저장한다.
pub fn run(config: &mut Config, tr: &mut Translator, config_path: &Path) -> Result<(), AppError> {
    run_with_input(config, tr, config_path, &mut io::stdin().lock())
}

/// 입력 스트림을 받아 메뉴 루프를 돈다. 입력이 끝나면 종료로 본다.
pub fn run_with_input<R: BufRead>(
    config: &mut Config,
    tr: &mut Translator,
    config_path: &Path,
    input: &mut R,
) -> Result<(), AppError> {
    match menu_loop(config, tr, config_path, input) {
        Err(AppError::EndOfInput) => {
            log::info!(target: "app", "stdin closed, leaving menu");
            Ok(())
        }
        other => other,
    }
}

fn menu_loop<R: BufRead>(
    config: &mut Config,
    tr: &mut Translator,
    config_path: &Path,
    input: &mut R,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr, input)? {
            MenuChoice::Calculate => ui_cli::handle_calculation(tr, config, input)?,
            MenuChoice::Constants => ui_cli::handle_constants(tr, config),
            MenuChoice::Language => {
                if ui_cli::handle_language(tr, config, input)? {
                    let resolved = i18n::resolve_language(&config.language, None);
                    *tr = Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
                    config.save_to(config_path)?;
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn temp_config(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("air_handling_app_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn empty_stdin_exits_cleanly() {
        let mut cfg = Config::default();
        let mut tr = Translator::new("en-us");
        let path = temp_config("eof");
        run_with_input(&mut cfg, &mut tr, &path, &mut io::empty()).expect("clean exit");
        assert!(!path.exists());
    }

    #[test]
    fn language_change_is_saved_to_the_loaded_file() {
        let path = temp_config("custom");
        let initial = Config {
            language: "en-us".into(),
            ..Config::default()
        };
        initial.save_to(&path).expect("save");

        let mut cfg = config::load_from(&path).expect("load");
        let mut tr = Translator::new("en-us");
        let mut input: &[u8] = b"3\n3\n0\n";
        run_with_input(&mut cfg, &mut tr, &path, &mut input).expect("run");

        let reloaded = config::load_from(&path).expect("reload");
        let _ = std::fs::remove_file(&path);
        assert_eq!(reloaded.language, "de-de");
        assert_eq!(tr.language_code(), "de-de");
    }
}
