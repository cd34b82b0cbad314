//! 냉각(제습) 후 재열하는 2단 공조 프로세스의 열·물질 수지.
//!
//! 외기 → 냉각코일 출구 → 급기의 세 상태를 잇고, 응축수량, 냉각/재열 열량,
//! 냉수/온수 유량을 구한다.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::humid_air::{AirState, PhysicalDomainError};
use super::input::{InputParseError, ProcessInput};

const LOG_TARGET: &str = "air::process";
const SECONDS_PER_HOUR: f64 = 3600.0;
/// 물 밀도 [kg/m³]
const WATER_DENSITY_KG_PER_M3: f64 = 1000.0;

/// 가정값 모음. 공식은 그대로 두고 이 값만 바꿔 계산할 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConstants {
    /// 냉각코일 출구 공기 온도 가정값 [°C]
    pub coil_exit_temperature_c: f64,
    /// 냉수 온도차 [K] (8/13 °C)
    pub cooling_water_delta_t_k: f64,
    /// 온수 온도차 [K] (70/50 °C)
    pub heating_water_delta_t_k: f64,
    /// 물 비열 [kJ/kg·K]
    pub water_specific_heat_kj_per_kg_k: f64,
    /// 공기 밀도 [kg/m³]. 온도/압력과 무관한 고정값.
    pub air_density_kg_per_m3: f64,
}

impl Default for ProcessConstants {
    fn default() -> Self {
        Self {
            coil_exit_temperature_c: 12.0,
            cooling_water_delta_t_k: 5.0,
            heating_water_delta_t_k: 20.0,
            water_specific_heat_kj_per_kg_k: 4.18,
            air_density_kg_per_m3: 1.2,
        }
    }
}

/// 사용할 수 없는 가정값.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{name} must be {requirement} (got {value})")]
pub struct InvalidConstant {
    pub name: &'static str,
    pub requirement: &'static str,
    pub value: f64,
}

impl ProcessConstants {
    /// 온도차/비열/밀도는 양수, 코일 출구 온도는 유한값이어야 한다.
    pub fn validate(&self) -> Result<(), InvalidConstant> {
        if !self.coil_exit_temperature_c.is_finite() {
            return Err(InvalidConstant {
                name: "coil_exit_temperature_c",
                requirement: "a finite number",
                value: self.coil_exit_temperature_c,
            });
        }
        let positive = [
            ("cooling_water_delta_t_k", self.cooling_water_delta_t_k),
            ("heating_water_delta_t_k", self.heating_water_delta_t_k),
            ("water_specific_heat_kj_per_kg_k", self.water_specific_heat_kj_per_kg_k),
            ("air_density_kg_per_m3", self.air_density_kg_per_m3),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidConstant {
                    name,
                    requirement: "a positive finite number",
                    value,
                });
            }
        }
        Ok(())
    }
}

/// 프로세스 상의 공기 상태 위치.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Outdoor,
    CoilExit,
    Supply,
}

impl Stage {
    /// 처리 순서(외기 → 코일 출구 → 급기).
    pub const ORDER: [Stage; 3] = [Stage::Outdoor, Stage::CoilExit, Stage::Supply];

    pub fn label_key(self) -> &'static str {
        match self {
            Stage::Outdoor => "stage.outdoor",
            Stage::CoilExit => "stage.coil_exit",
            Stage::Supply => "stage.supply",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Outdoor => "outdoor",
            Stage::CoilExit => "coil exit",
            Stage::Supply => "supply",
        })
    }
}

/// 계산 실패. 실패 시 결과는 만들어지지 않는다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    #[error("invalid input: {0}")]
    Input(#[from] InputParseError),
    #[error("{stage} air state: {source}")]
    Domain {
        stage: Stage,
        #[source]
        source: PhysicalDomainError,
    },
    #[error("invalid process constant: {0}")]
    Constants(#[from] InvalidConstant),
    /// 입력은 유한하지만 결과가 f64 범위를 넘침(예: 지나치게 큰 풍량)
    #[error("{quantity} overflows to a non-finite value")]
    NonFiniteResult { quantity: &'static str },
}

fn at_stage(stage: Stage) -> impl Fn(PhysicalDomainError) -> ProcessError {
    move |source| ProcessError::Domain { stage, source }
}

/// 결과는 만들어졌지만 가정이 맞지 않을 수 있는 경우.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessWarning {
    /// 코일 출구 가정 온도에서 목표 절대습도가 포화를 넘음(상대습도 > 100 %)
    CoilExitSupersaturated,
    /// 외기가 목표보다 건조해 코일이 가습해야 하는 상황(Δx < 0)
    NoDehumidification,
    /// 급기 온도가 코일 출구보다 낮아 재열 열량이 음수
    SupplyBelowCoilExit,
}

impl ProcessWarning {
    pub fn message_key(self) -> &'static str {
        match self {
            ProcessWarning::CoilExitSupersaturated => "warning.coil_supersaturated",
            ProcessWarning::NoDehumidification => "warning.no_dehumidification",
            ProcessWarning::SupplyBelowCoilExit => "warning.supply_below_coil",
        }
    }
}

/// 공조 프로세스 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResult {
    pub input: ProcessInput,
    /// 계산에 사용한 가정값
    pub constants: ProcessConstants,
    pub outdoor: AirState,
    pub coil_exit: AirState,
    pub supply: AirState,
    /// 공기 질량유량 [kg/h]
    pub mass_airflow_kg_per_h: f64,
    /// 코일 제습량 Δx [g/kg]
    pub humidity_difference_g_per_kg: f64,
    /// 응축수량 [kg/h]
    pub condensate_kg_per_h: f64,
    /// 냉각 열량 [kW]
    pub cooling_duty_kw: f64,
    /// 냉수 유량 [m³/h]
    pub cooling_water_m3_per_h: f64,
    /// 재열 온도 상승 [K]
    pub reheat_temperature_rise_k: f64,
    /// 재열 열량 [kW]
    pub reheat_duty_kw: f64,
    /// 온수 유량 [m³/h]
    pub heating_water_m3_per_h: f64,
    pub warnings: Vec<ProcessWarning>,
}

impl ProcessResult {
    pub fn state(&self, stage: Stage) -> &AirState {
        match stage {
            Stage::Outdoor => &self.outdoor,
            Stage::CoilExit => &self.coil_exit,
            Stage::Supply => &self.supply,
        }
    }

    /// 처리 순서대로 세 상태를 돌려준다.
    pub fn states(&self) -> [(Stage, &AirState); 3] {
        Stage::ORDER.map(|stage| (stage, self.state(stage)))
    }
}

/// 열량 [kW]을 주어진 온도차로 운반하는 물 체적유량 [m³/h].
pub fn water_flow_m3_per_h(duty_kw: f64, specific_heat_kj_per_kg_k: f64, delta_t_k: f64) -> f64 {
    duty_kw * SECONDS_PER_HOUR / (specific_heat_kj_per_kg_k * delta_t_k * WATER_DENSITY_KG_PER_M3)
}

/// 냉각 + 재열 공조 프로세스를 계산한다.
///
/// 코일 출구 절대습도는 급기 목표 절대습도와 같다고 본다(코일에서 목표 수분량까지
/// 정확히 제습하고 재열은 현열만 더함). 풍량이 0이면 모든 유량/열량이 0이 된다.
pub fn compute_process(
    input: &ProcessInput,
    constants: &ProcessConstants,
) -> Result<ProcessResult, ProcessError> {
    input.validate()?;
    constants.validate()?;

    let mass_airflow = constants.air_density_kg_per_m3 * input.airflow_m3_per_h;

    let outdoor = AirState::from_relative_humidity(
        input.outdoor_temperature_c,
        input.outdoor_relative_humidity_pct,
    )
    .map_err(at_stage(Stage::Outdoor))?;
    let supply = AirState::from_relative_humidity(
        input.supply_temperature_c,
        input.supply_relative_humidity_pct,
    )
    .map_err(at_stage(Stage::Supply))?;
    let coil_exit = AirState::from_absolute_humidity(
        constants.coil_exit_temperature_c,
        supply.absolute_humidity_g_per_kg,
    )
    .and_then(AirState::with_relative_humidity)
    .map_err(at_stage(Stage::CoilExit))?;

    let delta_x = outdoor.absolute_humidity_g_per_kg - coil_exit.absolute_humidity_g_per_kg;
    let condensate = mass_airflow * delta_x / 1000.0;

    let cooling_duty =
        mass_airflow * (outdoor.enthalpy_kj_per_kg - coil_exit.enthalpy_kj_per_kg) / SECONDS_PER_HOUR;
    let cooling_water = water_flow_m3_per_h(
        cooling_duty,
        constants.water_specific_heat_kj_per_kg_k,
        constants.cooling_water_delta_t_k,
    );

    let reheat_duty =
        mass_airflow * (supply.enthalpy_kj_per_kg - coil_exit.enthalpy_kj_per_kg) / SECONDS_PER_HOUR;
    let heating_water = water_flow_m3_per_h(
        reheat_duty,
        constants.water_specific_heat_kj_per_kg_k,
        constants.heating_water_delta_t_k,
    );

    let derived = [
        ("mass_airflow_kg_per_h", mass_airflow),
        ("condensate_kg_per_h", condensate),
        ("cooling_duty_kw", cooling_duty),
        ("cooling_water_m3_per_h", cooling_water),
        ("reheat_duty_kw", reheat_duty),
        ("heating_water_m3_per_h", heating_water),
    ];
    if let Some(&(quantity, _)) = derived.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ProcessError::NonFiniteResult { quantity });
    }

    let mut warnings = Vec::new();
    if coil_exit.is_supersaturated() {
        warnings.push(ProcessWarning::CoilExitSupersaturated);
    }
    if delta_x < 0.0 {
        warnings.push(ProcessWarning::NoDehumidification);
    }
    if supply.temperature_c < coil_exit.temperature_c {
        warnings.push(ProcessWarning::SupplyBelowCoilExit);
    }

    log::debug!(
        target: LOG_TARGET,
        "x_out={:.2} x_coil={:.2} h_out={:.2} h_coil={:.2} h_supply={:.2} g/kg|kJ/kg",
        outdoor.absolute_humidity_g_per_kg,
        coil_exit.absolute_humidity_g_per_kg,
        outdoor.enthalpy_kj_per_kg,
        coil_exit.enthalpy_kj_per_kg,
        supply.enthalpy_kj_per_kg,
    );
    for w in &warnings {
        log::warn!(target: LOG_TARGET, "process warning: {w:?}");
    }

    Ok(ProcessResult {
        input: *input,
        constants: *constants,
        outdoor,
        coil_exit,
        supply,
        mass_airflow_kg_per_h: mass_airflow,
        humidity_difference_g_per_kg: delta_x,
        condensate_kg_per_h: condensate,
        cooling_duty_kw: cooling_duty,
        cooling_water_m3_per_h: cooling_water,
        reheat_temperature_rise_k: supply.temperature_c - coil_exit.temperature_c,
        reheat_duty_kw: reheat_duty,
        heating_water_m3_per_h: heating_water,
        warnings,
    })
}
