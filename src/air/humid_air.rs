//! 습공기 상태량 계산 모듈.
//!
//! Tetens 식으로 포화수증기압을 추정하고, 고정 대기압(1013 hPa) 기준으로
//! 절대습도 x [g/kg], 상대습도 [%], 습공기 비엔탈피 h [kJ/kg]를 구한다.

use thiserror::Error;

/// 계산에 사용하는 고정 대기압 [hPa]
pub const ATMOSPHERIC_PRESSURE_HPA: f64 = 1013.0;

/// 수증기/건공기 분자량비(0.622)를 g/kg 기준으로 표현한 값
const MOLAR_MASS_RATIO_G_PER_KG: f64 = 622.0;
/// 건공기 정압비열 [kJ/kg·K]
const CP_DRY_AIR: f64 = 1.005;
/// 수증기 정압비열 [kJ/kg·K]
const CP_VAPOR: f64 = 1.86;
/// 0 °C 기준 증발잠열 [kJ/kg]
const LATENT_HEAT_0C: f64 = 2501.0;

/// 물리적으로 정의되지 않는 입력에 대한 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicalDomainError {
    /// NaN 또는 무한대 입력
    #[error("{quantity} must be a finite number (got {value})")]
    NonFinite { quantity: &'static str, value: f64 },
    /// Tetens 식의 특이점(-237.3 °C) 이하 온도
    #[error("temperature {0} °C is outside the range of the saturation pressure formula")]
    TemperatureOutOfRange(f64),
    /// 상대습도가 0~100 % 범위를 벗어남
    #[error("relative humidity {0} % is outside 0..=100 %")]
    RelativeHumidityOutOfRange(f64),
    /// 음수 절대습도
    #[error("absolute humidity {0} g/kg must not be negative")]
    NegativeAbsoluteHumidity(f64),
    /// 수증기 분압이 대기압 이상이라 절대습도가 발산함
    #[error("vapor pressure {vapor_pressure_hpa:.1} hPa reaches the atmospheric pressure of 1013 hPa")]
    VaporPressureAtCeiling { vapor_pressure_hpa: f64 },
}

fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, PhysicalDomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicalDomainError::NonFinite { quantity, value })
    }
}

/// Tetens 식으로 포화수증기압 [hPa]을 구한다.
///
/// 입력 검증을 하지 않는다. 검증이 필요한 경우 [`absolute_humidity`] 등을 사용한다.
pub fn saturation_pressure_hpa(t_c: f64) -> f64 {
    // Tetens: Psat(hPa) = 6.1078 * exp(17.27*T / (T+237.3))
    6.1078 * (17.27 * t_c / (t_c + 237.3)).exp()
}

fn checked_saturation_pressure_hpa(t_c: f64) -> Result<f64, PhysicalDomainError> {
    let t_c = ensure_finite("temperature", t_c)?;
    if t_c + 237.3 <= 0.0 {
        return Err(PhysicalDomainError::TemperatureOutOfRange(t_c));
    }
    let p_sat = saturation_pressure_hpa(t_c);
    if !p_sat.is_finite() || p_sat <= 0.0 {
        return Err(PhysicalDomainError::TemperatureOutOfRange(t_c));
    }
    Ok(p_sat)
}

/// 건구온도 [°C]와 상대습도 [%]로 절대습도 [g/kg]를 계산한다.
///
/// x = 622 · Pv / (1013 − Pv), Pv = φ · Psat(T).
/// 상대습도가 0~100 %를 벗어나면 보정하지 않고 오류를 반환한다.
/// 수증기 분압이 대기압 이상(약 100 °C 포화)이면 분모가 0 이하가 되므로 역시 오류다.
pub fn absolute_humidity(t_c: f64, relative_humidity_pct: f64) -> Result<f64, PhysicalDomainError> {
    let p_sat = checked_saturation_pressure_hpa(t_c)?;
    let rh = ensure_finite("relative humidity", relative_humidity_pct)?;
    if !(0.0..=100.0).contains(&rh) {
        return Err(PhysicalDomainError::RelativeHumidityOutOfRange(rh));
    }
    let p_vapor = rh / 100.0 * p_sat;
    if p_vapor >= ATMOSPHERIC_PRESSURE_HPA {
        return Err(PhysicalDomainError::VaporPressureAtCeiling {
            vapor_pressure_hpa: p_vapor,
        });
    }
    Ok(MOLAR_MASS_RATIO_G_PER_KG * p_vapor / (ATMOSPHERIC_PRESSURE_HPA - p_vapor))
}

/// 건구온도 [°C]와 절대습도 [g/kg]로 상대습도 [%]를 역산한다.
///
/// 결과가 100 %를 넘을 수 있다(과포화). 판단은 호출 측에 맡긴다.
pub fn relative_humidity(t_c: f64, absolute_humidity_g_per_kg: f64) -> Result<f64, PhysicalDomainError> {
    let p_sat = checked_saturation_pressure_hpa(t_c)?;
    let x = ensure_finite("absolute humidity", absolute_humidity_g_per_kg)?;
    if x < 0.0 {
        return Err(PhysicalDomainError::NegativeAbsoluteHumidity(x));
    }
    let p_vapor = x / (MOLAR_MASS_RATIO_G_PER_KG + x) * ATMOSPHERIC_PRESSURE_HPA;
    Ok(p_vapor / p_sat * 100.0)
}

/// 습공기 비엔탈피 [kJ/kg 건공기].
///
/// h = 1.005·T + x/1000 · (2501 + 1.86·T)
pub fn enthalpy(t_c: f64, absolute_humidity_g_per_kg: f64) -> Result<f64, PhysicalDomainError> {
    let t = ensure_finite("temperature", t_c)?;
    let x = ensure_finite("absolute humidity", absolute_humidity_g_per_kg)?;
    Ok(CP_DRY_AIR * t + (x / 1000.0) * (LATENT_HEAT_0C + CP_VAPOR * t))
}

/// 하나의 습공기 상태.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirState {
    /// 건구온도 [°C]
    pub temperature_c: f64,
    /// 상대습도 [%]. 절대습도로부터 만든 상태는 역산 전까지 `None`.
    pub relative_humidity_pct: Option<f64>,
    /// 절대습도 [g/kg]
    pub absolute_humidity_g_per_kg: f64,
    /// 비엔탈피 [kJ/kg]
    pub enthalpy_kj_per_kg: f64,
}

impl AirState {
    /// 온도와 상대습도로 상태를 구성한다.
    pub fn from_relative_humidity(t_c: f64, relative_humidity_pct: f64) -> Result<Self, PhysicalDomainError> {
        let x = absolute_humidity(t_c, relative_humidity_pct)?;
        Ok(Self {
            temperature_c: t_c,
            relative_humidity_pct: Some(relative_humidity_pct),
            absolute_humidity_g_per_kg: x,
            enthalpy_kj_per_kg: enthalpy(t_c, x)?,
        })
    }

    /// 온도와 절대습도로 상태를 구성한다. 상대습도는 비워둔다.
    pub fn from_absolute_humidity(t_c: f64, absolute_humidity_g_per_kg: f64) -> Result<Self, PhysicalDomainError> {
        if absolute_humidity_g_per_kg < 0.0 {
            return Err(PhysicalDomainError::NegativeAbsoluteHumidity(absolute_humidity_g_per_kg));
        }
        Ok(Self {
            temperature_c: t_c,
            relative_humidity_pct: None,
            absolute_humidity_g_per_kg,
            enthalpy_kj_per_kg: enthalpy(t_c, absolute_humidity_g_per_kg)?,
        })
    }

    /// 상대습도를 역산해 채운 상태를 돌려준다.
    pub fn with_relative_humidity(self) -> Result<Self, PhysicalDomainError> {
        let rh = relative_humidity(self.temperature_c, self.absolute_humidity_g_per_kg)?;
        Ok(Self {
            relative_humidity_pct: Some(rh),
            ..self
        })
    }

    /// 상대습도가 100 %를 넘는 (물리적으로 유지될 수 없는) 상태인지.
    pub fn is_supersaturated(&self) -> bool {
        self.relative_humidity_pct.is_some_and(|rh| rh > 100.0)
    }
}
