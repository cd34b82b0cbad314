//! 입력 폼 값 검증 및 [`ProcessInput`] 변환.

use std::fmt;

use thiserror::Error;

/// 공조 계산에 필요한 다섯 개 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OutdoorTemperature,
    OutdoorRelativeHumidity,
    SupplyTemperature,
    SupplyRelativeHumidity,
    Airflow,
}

impl Field {
    /// 폼 표시 순서.
    pub const ALL: [Field; 5] = [
        Field::OutdoorTemperature,
        Field::OutdoorRelativeHumidity,
        Field::SupplyTemperature,
        Field::SupplyRelativeHumidity,
        Field::Airflow,
    ];

    /// 번역 키
    pub fn label_key(self) -> &'static str {
        match self {
            Field::OutdoorTemperature => "field.outdoor_temperature",
            Field::OutdoorRelativeHumidity => "field.outdoor_relative_humidity",
            Field::SupplyTemperature => "field.supply_temperature",
            Field::SupplyRelativeHumidity => "field.supply_relative_humidity",
            Field::Airflow => "field.airflow",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::OutdoorTemperature => "outdoor temperature",
            Field::OutdoorRelativeHumidity => "outdoor relative humidity",
            Field::SupplyTemperature => "supply temperature",
            Field::SupplyRelativeHumidity => "supply relative humidity",
            Field::Airflow => "airflow",
        };
        f.write_str(name)
    }
}

/// 입력값이 거부된 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// 비어 있음
    Missing,
    /// 숫자로 해석할 수 없음
    NotANumber,
    /// NaN/무한대
    NonFinite,
    /// 음수 풍량
    Negative,
}

impl InputErrorKind {
    pub fn message_key(self) -> &'static str {
        match self {
            InputErrorKind::Missing => "input.missing",
            InputErrorKind::NotANumber => "input.not_a_number",
            InputErrorKind::NonFinite => "input.non_finite",
            InputErrorKind::Negative => "input.negative",
        }
    }
}

impl fmt::Display for InputErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InputErrorKind::Missing => "value is missing",
            InputErrorKind::NotANumber => "not a number",
            InputErrorKind::NonFinite => "must be a finite number",
            InputErrorKind::Negative => "must not be negative",
        };
        f.write_str(msg)
    }
}

/// 입력 항목 하나가 잘못되었음을 알린다. 부분 계산은 하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct InputParseError {
    pub field: Field,
    pub kind: InputErrorKind,
}

impl InputParseError {
    pub fn new(field: Field, kind: InputErrorKind) -> Self {
        Self { field, kind }
    }
}

/// 사용자가 입력한 원문 그대로의 폼 값. GUI 텍스트 박스 버퍼로도 쓴다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub outdoor_temperature: String,
    pub outdoor_relative_humidity: String,
    pub supply_temperature: String,
    pub supply_relative_humidity: String,
    pub airflow: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::OutdoorTemperature => &self.outdoor_temperature,
            Field::OutdoorRelativeHumidity => &self.outdoor_relative_humidity,
            Field::SupplyTemperature => &self.supply_temperature,
            Field::SupplyRelativeHumidity => &self.supply_relative_humidity,
            Field::Airflow => &self.airflow,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::OutdoorTemperature => &mut self.outdoor_temperature,
            Field::OutdoorRelativeHumidity => &mut self.outdoor_relative_humidity,
            Field::SupplyTemperature => &mut self.supply_temperature,
            Field::SupplyRelativeHumidity => &mut self.supply_relative_humidity,
            Field::Airflow => &mut self.airflow,
        }
    }
}

impl From<&ProcessInput> for FormFields {
    fn from(input: &ProcessInput) -> Self {
        let mut fields = FormFields::default();
        for field in Field::ALL {
            *fields.get_mut(field) = input.value(field).to_string();
        }
        fields
    }
}

/// 천 단위 구분으로 읽힐 수 있는 `5,000` 형태인지.
fn looks_like_thousands_group(s: &str) -> bool {
    s.split_once(',')
        .is_some_and(|(_, rest)| rest.len() == 3 && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// 문자열 하나를 숫자로 해석한다. 소수점 쉼표(`22,5`)도 허용한다.
///
/// 구분 기호가 둘 이상이거나 `5,000`처럼 천 단위 구분과 헷갈리는 값은
/// 1000배 차이로 잘못 읽지 않도록 숫자가 아닌 것으로 거부한다.
pub fn parse_value(field: Field, raw: &str) -> Result<f64, InputParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputParseError::new(field, InputErrorKind::Missing));
    }
    let separators = trimmed.chars().filter(|c| matches!(c, ',' | '.')).count();
    if separators > 1 || looks_like_thousands_group(trimmed) {
        return Err(InputParseError::new(field, InputErrorKind::NotANumber));
    }
    let normalized = trimmed.replacen(',', ".", 1);
    let value: f64 = normalized
        .parse()
        .map_err(|_| InputParseError::new(field, InputErrorKind::NotANumber))?;
    if !value.is_finite() {
        return Err(InputParseError::new(field, InputErrorKind::NonFinite));
    }
    Ok(value)
}

/// 공조 프로세스 입력값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessInput {
    /// 외기 온도 [°C]
    pub outdoor_temperature_c: f64,
    /// 외기 상대습도 [%]
    pub outdoor_relative_humidity_pct: f64,
    /// 급기 목표 온도 [°C]
    pub supply_temperature_c: f64,
    /// 급기 목표 상대습도 [%]
    pub supply_relative_humidity_pct: f64,
    /// 풍량 [m³/h]
    pub airflow_m3_per_h: f64,
}

impl ProcessInput {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::OutdoorTemperature => self.outdoor_temperature_c,
            Field::OutdoorRelativeHumidity => self.outdoor_relative_humidity_pct,
            Field::SupplyTemperature => self.supply_temperature_c,
            Field::SupplyRelativeHumidity => self.supply_relative_humidity_pct,
            Field::Airflow => self.airflow_m3_per_h,
        }
    }

    /// 모든 값이 유한하고 풍량이 음수가 아닌지 확인한다.
    ///
    /// 상대습도 범위는 물리 영역 검사에서 다룬다.
    pub fn validate(&self) -> Result<(), InputParseError> {
        for field in Field::ALL {
            if !self.value(field).is_finite() {
                return Err(InputParseError::new(field, InputErrorKind::NonFinite));
            }
        }
        if self.airflow_m3_per_h < 0.0 {
            return Err(InputParseError::new(Field::Airflow, InputErrorKind::Negative));
        }
        Ok(())
    }

    /// 폼 원문을 파싱한다. 첫 번째로 잘못된 항목에서 멈춘다.
    pub fn parse(fields: &FormFields) -> Result<Self, InputParseError> {
        let read = |field: Field| parse_value(field, fields.get(field));
        let input = Self {
            outdoor_temperature_c: read(Field::OutdoorTemperature)?,
            outdoor_relative_humidity_pct: read(Field::OutdoorRelativeHumidity)?,
            supply_temperature_c: read(Field::SupplyTemperature)?,
            supply_relative_humidity_pct: read(Field::SupplyRelativeHumidity)?,
            airflow_m3_per_h: read(Field::Airflow)?,
        };
        input.validate()?;
        Ok(input)
    }
}

impl TryFrom<&FormFields> for ProcessInput {
    type Error = InputParseError;

    fn try_from(fields: &FormFields) -> Result<Self, Self::Error> {
        ProcessInput::parse(fields)
    }
}
