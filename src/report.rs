//! 계산 결과/오류를 사람이 읽는 문자열로 만든다.
//!
//! 자릿수: 온도·상대습도·온도차 1자리, g/kg·kg/h·m³/h(물)·kW·kJ/kg 2자리,
//! 풍량(m³/h, kg/h) 0자리.

use std::fmt::Write;

use crate::air::humid_air::{AirState, PhysicalDomainError};
use crate::air::process::{ProcessConstants, ProcessError, ProcessResult, Stage};
use crate::i18n::{keys, Translator};

/// `-0.00` 같은 표기를 피하기 위해 음의 0을 0으로 바꿔 고정 소수로 만든다.
fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value + 0.0)
}

fn line(out: &mut String, label: &str, value: String, unit: &str) {
    let _ = writeln!(out, "- {label}: {value} {unit}");
}

fn heading_key(stage: Stage) -> &'static str {
    match stage {
        Stage::Outdoor => "report.outdoor",
        Stage::CoilExit => "report.coil_exit",
        Stage::Supply => "report.supply",
    }
}

fn state_block(out: &mut String, tr: &Translator, stage: Stage, state: &AirState) {
    let _ = writeln!(out, "{}", tr.t(heading_key(stage)));
    line(out, &tr.t("label.temperature"), fixed(state.temperature_c, 1), "°C");
    // 코일 출구는 절대습도가 먼저 정해지고 상대습도는 역산값이다.
    let x = (
        tr.t("label.absolute_humidity"),
        fixed(state.absolute_humidity_g_per_kg, 2),
        "g/kg",
    );
    let rh = state
        .relative_humidity_pct
        .map(|rh| (tr.t("label.relative_humidity"), fixed(rh, 1), "%"));
    match (stage, rh) {
        (Stage::CoilExit, Some(rh)) => {
            line(out, &x.0, x.1, x.2);
            line(out, &rh.0, rh.1, rh.2);
        }
        (_, Some(rh)) => {
            line(out, &rh.0, rh.1, rh.2);
            line(out, &x.0, x.1, x.2);
        }
        (_, None) => line(out, &x.0, x.1, x.2),
    }
    line(out, &tr.t("label.enthalpy"), fixed(state.enthalpy_kj_per_kg, 2), "kJ/kg");
    out.push('\n');
}

/// 전체 계산 결과 보고서.
pub fn format_report(result: &ProcessResult, tr: &Translator) -> String {
    let mut out = String::new();
    for (stage, state) in result.states() {
        state_block(&mut out, tr, stage, state);
    }

    let _ = writeln!(out, "{}", tr.t("report.airflow"));
    line(&mut out, &tr.t("label.volume_flow"), fixed(result.input.airflow_m3_per_h, 0), "m³/h");
    line(&mut out, &tr.t("label.mass_flow"), fixed(result.mass_airflow_kg_per_h, 0), "kg/h");
    out.push('\n');

    let _ = writeln!(out, "{}", tr.t("report.dehumidification"));
    line(
        &mut out,
        &tr.t("label.humidity_difference"),
        fixed(result.humidity_difference_g_per_kg, 2),
        "g/kg",
    );
    line(&mut out, &tr.t("label.condensate"), fixed(result.condensate_kg_per_h, 2), "kg/h");
    line(&mut out, &tr.t("label.cooling_duty"), fixed(result.cooling_duty_kw, 2), "kW");
    line(
        &mut out,
        &tr.fill(
            "label.cooling_water",
            &[("dt", fixed(result.constants.cooling_water_delta_t_k, 1))],
        ),
        fixed(result.cooling_water_m3_per_h, 2),
        "m³/h",
    );
    out.push('\n');

    let _ = writeln!(out, "{}", tr.t("report.reheat"));
    line(
        &mut out,
        &tr.t("label.temperature_rise"),
        fixed(result.reheat_temperature_rise_k, 1),
        "K",
    );
    line(&mut out, &tr.t("label.heating_duty"), fixed(result.reheat_duty_kw, 2), "kW");
    line(
        &mut out,
        &tr.fill(
            "label.heating_water",
            &[("dt", fixed(result.constants.heating_water_delta_t_k, 1))],
        ),
        fixed(result.heating_water_m3_per_h, 2),
        "m³/h",
    );

    if !result.warnings.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", tr.t("report.warnings"));
        for w in &result.warnings {
            let _ = writeln!(out, "! {}", tr.t(w.message_key()));
        }
    }
    out
}

/// 가정값 목록.
pub fn format_constants(constants: &ProcessConstants, tr: &Translator) -> String {
    let mut out = String::new();
    let rows = [
        (keys::CONSTANTS_COIL_EXIT_TEMPERATURE, fixed(constants.coil_exit_temperature_c, 1), "°C"),
        (keys::CONSTANTS_COOLING_WATER_DELTA_T, fixed(constants.cooling_water_delta_t_k, 1), "K"),
        (keys::CONSTANTS_HEATING_WATER_DELTA_T, fixed(constants.heating_water_delta_t_k, 1), "K"),
        (
            keys::CONSTANTS_WATER_SPECIFIC_HEAT,
            fixed(constants.water_specific_heat_kj_per_kg_k, 2),
            "kJ/(kg·K)",
        ),
        (keys::CONSTANTS_AIR_DENSITY, fixed(constants.air_density_kg_per_m3, 2), "kg/m³"),
    ];
    for (key, value, unit) in rows {
        line(&mut out, &tr.t(key), value, unit);
    }
    out
}

/// 어떤 입력/상태가 실패했는지 알려주는 번역된 오류 문장.
pub fn describe_error(err: &ProcessError, tr: &Translator) -> String {
    match err {
        ProcessError::Input(e) => tr.fill(e.kind.message_key(), &[("field", tr.t(e.field.label_key()))]),
        ProcessError::Domain { stage, source } => {
            let stage = tr.t(stage.label_key());
            let (key, mut vars) = match *source {
                PhysicalDomainError::NonFinite { quantity, .. } => {
                    ("domain.non_finite", vec![("detail", quantity.to_string())])
                }
                PhysicalDomainError::TemperatureOutOfRange(t) => {
                    ("domain.temperature_range", vec![("value", fixed(t, 1))])
                }
                PhysicalDomainError::RelativeHumidityOutOfRange(rh) => {
                    ("domain.rh_range", vec![("value", fixed(rh, 1))])
                }
                PhysicalDomainError::NegativeAbsoluteHumidity(x) => {
                    ("domain.negative_x", vec![("value", fixed(x, 2))])
                }
                PhysicalDomainError::VaporPressureAtCeiling { vapor_pressure_hpa } => {
                    ("domain.saturated", vec![("value", fixed(vapor_pressure_hpa, 1))])
                }
            };
            vars.push(("stage", stage));
            tr.fill(key, &vars)
        }
        ProcessError::NonFiniteResult { quantity } => {
            tr.fill("domain.result_overflow", &[("detail", quantity.to_string())])
        }
        ProcessError::Constants(c) => tr.fill(
            "domain.constant",
            &[("detail", c.name.to_string()), ("value", c.value.to_string())],
        ),
    }
}
