//! 냉각 + 재열 프로세스 수지 테스트.
use air_handling_toolbox::air::{
    compute_process, Field, InputErrorKind, InputParseError, PhysicalDomainError,
    ProcessConstants, ProcessError, ProcessInput, ProcessWarning, Stage,
};
use approx::{assert_abs_diff_eq, assert_relative_eq};

fn input(t_out: f64, rh_out: f64, t_supply: f64, rh_supply: f64, airflow: f64) -> ProcessInput {
    ProcessInput {
        outdoor_temperature_c: t_out,
        outdoor_relative_humidity_pct: rh_out,
        supply_temperature_c: t_supply,
        supply_relative_humidity_pct: rh_supply,
        airflow_m3_per_h: airflow,
    }
}

#[test]
fn summer_design_case() {
    let res = compute_process(&input(30.0, 60.0, 22.0, 50.0, 5000.0), &ProcessConstants::default())
        .expect("process");

    assert_relative_eq!(res.mass_airflow_kg_per_h, 6000.0, max_relative = 1e-12);
    assert_eq!(res.coil_exit.temperature_c, 12.0);
    assert_eq!(
        res.coil_exit.absolute_humidity_g_per_kg,
        res.supply.absolute_humidity_g_per_kg
    );
    assert!(res.humidity_difference_g_per_kg > 0.0);
    assert_relative_eq!(
        res.humidity_difference_g_per_kg,
        res.outdoor.absolute_humidity_g_per_kg - res.supply.absolute_humidity_g_per_kg,
        max_relative = 1e-12
    );

    assert_abs_diff_eq!(res.outdoor.absolute_humidity_g_per_kg, 16.03, epsilon = 0.01);
    assert_abs_diff_eq!(res.supply.absolute_humidity_g_per_kg, 8.22, epsilon = 0.01);
    assert_abs_diff_eq!(res.condensate_kg_per_h, 46.86, epsilon = 0.01);
    assert_abs_diff_eq!(res.cooling_duty_kw, 63.89, epsilon = 0.01);
    assert_abs_diff_eq!(res.cooling_water_m3_per_h, 11.01, epsilon = 0.01);
    assert_abs_diff_eq!(res.reheat_duty_kw, 17.00, epsilon = 0.01);
    assert_abs_diff_eq!(res.heating_water_m3_per_h, 0.73, epsilon = 0.01);
    assert_abs_diff_eq!(res.reheat_temperature_rise_k, 10.0, epsilon = 1e-12);

    let rh_coil = res.coil_exit.relative_humidity_pct.expect("coil rh");
    assert_abs_diff_eq!(rh_coil, 94.25, epsilon = 0.01);
    assert!(res.warnings.is_empty(), "{:?}", res.warnings);
}

#[test]
fn zero_airflow_yields_zero_flows() {
    let res = compute_process(&input(30.0, 60.0, 22.0, 50.0, 0.0), &ProcessConstants::default())
        .expect("process");
    assert_eq!(res.mass_airflow_kg_per_h, 0.0);
    assert_eq!(res.condensate_kg_per_h, 0.0);
    assert_eq!(res.cooling_duty_kw, 0.0);
    assert_eq!(res.cooling_water_m3_per_h, 0.0);
    assert_eq!(res.reheat_duty_kw, 0.0);
    assert_eq!(res.heating_water_m3_per_h, 0.0);
}

#[test]
fn saturated_hot_outdoor_air_still_computes() {
    let res = compute_process(&input(40.0, 100.0, 22.0, 50.0, 1000.0), &ProcessConstants::default())
        .expect("process");
    assert!(res.outdoor.absolute_humidity_g_per_kg.is_finite());
    assert!(res.cooling_duty_kw > 0.0);
}

#[test]
fn boiling_outdoor_air_is_a_domain_error() {
    let err = compute_process(&input(100.0, 100.0, 22.0, 50.0, 1000.0), &ProcessConstants::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Domain {
            stage: Stage::Outdoor,
            source: PhysicalDomainError::VaporPressureAtCeiling { .. }
        }
    ));
}

#[test]
fn supply_humidity_out_of_range_names_the_supply_stage() {
    let err = compute_process(&input(30.0, 60.0, 22.0, 120.0, 1000.0), &ProcessConstants::default())
        .unwrap_err();
    assert_eq!(
        err,
        ProcessError::Domain {
            stage: Stage::Supply,
            source: PhysicalDomainError::RelativeHumidityOutOfRange(120.0),
        }
    );
}

#[test]
fn non_finite_input_is_rejected_before_calculation() {
    let err = compute_process(&input(f64::NAN, 60.0, 22.0, 50.0, 1000.0), &ProcessConstants::default())
        .unwrap_err();
    assert_eq!(
        err,
        ProcessError::Input(InputParseError::new(Field::OutdoorTemperature, InputErrorKind::NonFinite))
    );
}

#[test]
fn negative_airflow_is_rejected() {
    let err = compute_process(&input(30.0, 60.0, 22.0, 50.0, -1.0), &ProcessConstants::default())
        .unwrap_err();
    assert_eq!(
        err,
        ProcessError::Input(InputParseError::new(Field::Airflow, InputErrorKind::Negative))
    );
}

#[test]
fn humid_target_supersaturates_the_coil_exit() {
    let res = compute_process(&input(30.0, 60.0, 26.0, 60.0, 1000.0), &ProcessConstants::default())
        .expect("process");
    assert!(res.coil_exit.is_supersaturated());
    assert_eq!(res.warnings, vec![ProcessWarning::CoilExitSupersaturated]);
}

#[test]
fn dry_outdoor_air_and_cold_supply_raise_warnings() {
    let res = compute_process(&input(5.0, 30.0, 10.0, 80.0, 1000.0), &ProcessConstants::default())
        .expect("process");
    assert!(res.humidity_difference_g_per_kg < 0.0);
    assert!(res.reheat_duty_kw < 0.0);
    assert!(res.warnings.contains(&ProcessWarning::NoDehumidification));
    assert!(res.warnings.contains(&ProcessWarning::SupplyBelowCoilExit));
}

#[test]
fn overridden_constants_flow_through_the_balance() {
    let constants = ProcessConstants {
        coil_exit_temperature_c: 14.0,
        cooling_water_delta_t_k: 6.0,
        heating_water_delta_t_k: 10.0,
        water_specific_heat_kj_per_kg_k: 4.19,
        air_density_kg_per_m3: 1.0,
    };
    let res = compute_process(&input(30.0, 60.0, 22.0, 50.0, 5000.0), &constants).expect("process");
    assert_eq!(res.mass_airflow_kg_per_h, 5000.0);
    assert_eq!(res.coil_exit.temperature_c, 14.0);
    assert_relative_eq!(
        res.cooling_water_m3_per_h,
        res.cooling_duty_kw * 3600.0 / (4.19 * 6.0 * 1000.0),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        res.heating_water_m3_per_h,
        res.reheat_duty_kw * 3600.0 / (4.19 * 10.0 * 1000.0),
        max_relative = 1e-12
    );
    assert_eq!(res.constants, constants);
}

#[test]
fn invalid_constants_are_rejected() {
    let constants = ProcessConstants {
        heating_water_delta_t_k: 0.0,
        ..ProcessConstants::default()
    };
    let err = compute_process(&input(30.0, 60.0, 22.0, 50.0, 5000.0), &constants).unwrap_err();
    assert!(matches!(err, ProcessError::Constants(c) if c.name == "heating_water_delta_t_k"));
}

#[test]
fn states_are_in_process_order() {
    let res = compute_process(&input(30.0, 60.0, 22.0, 50.0, 5000.0), &ProcessConstants::default())
        .expect("process");
    let stages: Vec<Stage> = res.states().iter().map(|(s, _)| *s).collect();
    assert_eq!(stages, vec![Stage::Outdoor, Stage::CoilExit, Stage::Supply]);
}

#[test]
fn airflow_too_large_for_f64_is_rejected() {
    let err = compute_process(&input(30.0, 60.0, 22.0, 50.0, 1e308), &ProcessConstants::default())
        .unwrap_err();
    assert_eq!(err, ProcessError::NonFiniteResult { quantity: "cooling_duty_kw" });
}

#[test]
fn large_but_representable_airflow_still_computes() {
    let res = compute_process(&input(30.0, 60.0, 22.0, 50.0, 1e9), &ProcessConstants::default())
        .expect("process");
    assert!(res.cooling_duty_kw.is_finite());
    assert_relative_eq!(res.mass_airflow_kg_per_h, 1.2e9, max_relative = 1e-12);
}
