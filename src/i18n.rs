use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// CLI에서 직접 쓰는 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MENU_TITLE: &str = "menu.title";
    pub const MENU_CALCULATE: &str = "menu.calculate";
    pub const MENU_CONSTANTS: &str = "menu.constants";
    pub const MENU_LANGUAGE: &str = "menu.language";
    pub const MENU_EXIT: &str = "menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const CONSTANTS_HEADING: &str = "constants.heading";
    pub const CONSTANTS_COIL_EXIT_TEMPERATURE: &str = "constants.coil_exit_temperature";
    pub const CONSTANTS_COOLING_WATER_DELTA_T: &str = "constants.cooling_water_delta_t";
    pub const CONSTANTS_HEATING_WATER_DELTA_T: &str = "constants.heating_water_delta_t";
    pub const CONSTANTS_WATER_SPECIFIC_HEAT: &str = "constants.water_specific_heat";
    pub const CONSTANTS_AIR_DENSITY: &str = "constants.air_density";
    pub const CONSTANTS_NOTE: &str = "constants.note";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

const FALLBACK_LANGUAGE: &str = "en-us";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    De,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("de") {
            Language::De
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en-us",
            Language::De => "de-de",
            Language::Ko => "ko-kr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    pack: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(en/de/ko)에 따라 내장 언어팩으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리 파일에 있는 키가 내장 문자열보다 우선한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut pack = built_in_pack(lang.as_code()).unwrap_or_default();
        if let Some(overrides) = pack_dir.and_then(|dir| load_overrides(dir, lang.as_code())) {
            pack.extend(overrides);
        }
        Self {
            lang,
            pack,
            fallback: built_in_pack(FALLBACK_LANGUAGE).unwrap_or_default(),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.pack.get(key).map(String::as_str)
    }

    /// 번역을 가져온다. 없으면 영어, 그래도 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key)
            .or_else(|| self.fallback.get(key).map(String::as_str))
            .unwrap_or(key)
            .to_string()
    }

    /// `{name}` 형태의 자리표시자를 채운 번역을 돌려준다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("de") => Some("de-de".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., de-de)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., de)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
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

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang {
        "en-us" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "de-de" => parse_toml_to_map(include_str!("../locales/de-de.toml")),
        "ko-kr" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_share_the_english_keys() {
        let en = built_in_pack("en-us").expect("en pack");
        for code in ["de-de", "ko-kr"] {
            let pack = built_in_pack(code).expect("pack");
            let missing: Vec<_> = en.keys().filter(|k| !pack.contains_key(*k)).collect();
            assert!(missing.is_empty(), "{code} is missing {missing:?}");
        }
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("de", Some("ko")), "de-de");
        assert_eq!(resolve_language("auto", Some("ko-KR")), "ko-kr");
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en-us");
        let text = tr.fill("label.cooling_water", &[("dt", "5.0".into())]);
        assert_eq!(text, "Chilled-water flow (ΔT 5.0 K)");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let tr = Translator::new("de");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_eq!(tr.language(), Language::De);
    }
}
