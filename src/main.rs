use std::path::PathBuf;
use std::process::ExitCode;

use air_handling_toolbox::air::{Field, FormFields};
use air_handling_toolbox::{app, config, i18n, logging, report};
use clap::Parser;

/// 냉각 + 재열 공조 프로세스 계산기 (CLI).
///
/// 다섯 입력값 중 하나라도 주면 한 번 계산하고 종료하며, 없으면 대화형 메뉴를 띄운다.
#[derive(Debug, Parser)]
#[command(name = "air_handling_toolbox_cli", version, about)]
struct Cli {
    /// 언어 (auto/en-us/de-de/ko-kr)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// 로그 레벨 (error/warn/info/debug/trace/off)
    #[arg(long)]
    log_level: Option<String>,
    /// 외기 온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    t_out: Option<String>,
    /// 외기 상대습도 [%]
    #[arg(long, allow_hyphen_values = true)]
    rh_out: Option<String>,
    /// 급기 온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    t_supply: Option<String>,
    /// 급기 상대습도 [%]
    #[arg(long, allow_hyphen_values = true)]
    rh_supply: Option<String>,
    /// 풍량 [m³/h]
    #[arg(long, allow_hyphen_values = true)]
    airflow: Option<String>,
}

impl Cli {
    /// 입력값 플래그가 하나라도 있으면 폼으로 모은다.
    fn one_shot_fields(&self) -> Option<FormFields> {
        let values = [
            (Field::OutdoorTemperature, &self.t_out),
            (Field::OutdoorRelativeHumidity, &self.rh_out),
            (Field::SupplyTemperature, &self.t_supply),
            (Field::SupplyRelativeHumidity, &self.rh_supply),
            (Field::Airflow, &self.airflow),
        ];
        if values.iter().all(|(_, v)| v.is_none()) {
            return None;
        }
        let mut fields = FormFields::default();
        for (field, value) in values {
            *fields.get_mut(field) = value.clone().unwrap_or_default();
        }
        Some(fields)
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, app::AppError> {
    let (mut cfg, config_path) = match &cli.config {
        Some(path) => (config::load_from(path)?, path.clone()),
        None => (config::load_or_default()?, PathBuf::from(config::DEFAULT_CONFIG_PATH)),
    };
    if let Some(level) = &cli.log_level {
        cfg.log_level = level.clone();
    }
    logging::init(cfg.log_level_filter());

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    log::debug!(target: "cli", "language resolved: {lang}");

    if let Some(fields) = cli.one_shot_fields() {
        return match app::calculate_report(&fields, &cfg, &tr) {
            Ok(text) => {
                print!("{text}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}: {}", tr.t(i18n::keys::ERROR_PREFIX), report::describe_error(&e, &tr));
                Ok(ExitCode::FAILURE)
            }
        };
    }

    app::run(&mut cfg, &mut tr, &config_path)?;
    Ok(ExitCode::SUCCESS)
}
