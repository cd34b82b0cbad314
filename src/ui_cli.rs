use std::io::{self, BufRead, Write};

use crate::air::{Field, FormFields};
use crate::app::{self, AppError};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Constants,
    Language,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead>(tr: &Translator, input: &mut R) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MENU_TITLE));
    println!("{}", tr.t(keys::MENU_CALCULATE));
    println!("{}", tr.t(keys::MENU_CONSTANTS));
    println!("{}", tr.t(keys::MENU_LANGUAGE));
    println!("{}", tr.t(keys::MENU_EXIT));
    loop {
        let sel = read_line(input, &tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Calculate),
        "2" => Some(MenuChoice::Constants),
        "3" => Some(MenuChoice::Language),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 다섯 항목을 입력받아 계산 결과(또는 어떤 항목이 잘못됐는지)를 출력한다.
pub fn handle_calculation<R: BufRead>(
    tr: &Translator,
    cfg: &Config,
    input: &mut R,
) -> Result<(), AppError> {
    let mut fields = FormFields::default();
    for field in Field::ALL {
        *fields.get_mut(field) = read_line(input, &format!("{}: ", tr.t(field.label_key())))?;
    }
    match app::calculate_report(&fields, cfg, tr) {
        Ok(text) => println!("\n{text}"),
        Err(e) => println!("{}: {}", tr.t(keys::ERROR_PREFIX), report::describe_error(&e, tr)),
    }
    Ok(())
}

/// 현재 가정값을 출력한다.
pub fn handle_constants(tr: &Translator, cfg: &Config) {
    println!("{}", tr.t(keys::CONSTANTS_HEADING));
    print!("{}", report::format_constants(&cfg.process, tr));
    println!("{}", tr.t(keys::CONSTANTS_NOTE));
}

/// 언어 설정 메뉴. 변경했으면 true.
pub fn handle_language<R: BufRead>(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut R,
) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, &tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let code = match sel.trim() {
        "1" => "auto",
        "2" => "en-us",
        "3" => "de-de",
        "4" => "ko-kr",
        "" => return Ok(false),
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(false);
        }
    };
    cfg.language = code.into();
    println!("{} {code}", tr.t(keys::SETTINGS_SAVED));
    Ok(true)
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면(EOF) `EndOfInput`.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::EndOfInput);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu_choice(" 1\n"), Some(MenuChoice::Calculate));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn closed_stdin_ends_the_menu() {
        let tr = Translator::new("en-us");
        let err = main_menu(&tr, &mut io::empty()).unwrap_err();
        assert!(matches!(err, AppError::EndOfInput));
    }

    #[test]
    fn invalid_selection_is_retried_until_input_runs_out() {
        let tr = Translator::new("en-us");
        let mut input: &[u8] = b"9\nx\n2\n";
        assert_eq!(main_menu(&tr, &mut input).unwrap(), MenuChoice::Constants);
        assert!(matches!(main_menu(&tr, &mut input), Err(AppError::EndOfInput)));
    }

    #[test]
    fn calculation_stops_at_end_of_input() {
        let tr = Translator::new("en-us");
        let mut input: &[u8] = b"30\n60\n";
        let err = handle_calculation(&tr, &Config::default(), &mut input).unwrap_err();
        assert!(matches!(err, AppError::EndOfInput));
    }
}
