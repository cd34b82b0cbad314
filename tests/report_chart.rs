//! 보고서 문자열과 그래프 경로 테스트.
use air_handling_toolbox::air::chart::{ChartPath, HUMIDITY_AXIS_G_PER_KG, TEMPERATURE_AXIS_C};
use air_handling_toolbox::air::{
    compute_process, ProcessConstants, ProcessError, ProcessInput, ProcessResult, Stage,
};
use air_handling_toolbox::app::calculate_report;
use air_handling_toolbox::air::{Field, FormFields};
use air_handling_toolbox::config::Config;
use air_handling_toolbox::i18n::Translator;
use air_handling_toolbox::report::{describe_error, format_constants, format_report};

fn run(t_out: f64, rh_out: f64, t_supply: f64, rh_supply: f64, airflow: f64) -> ProcessResult {
    compute_process(
        &ProcessInput {
            outdoor_temperature_c: t_out,
            outdoor_relative_humidity_pct: rh_out,
            supply_temperature_c: t_supply,
            supply_relative_humidity_pct: rh_supply,
            airflow_m3_per_h: airflow,
        },
        &ProcessConstants::default(),
    )
    .expect("process")
}

#[test]
fn english_report_uses_fixed_precision() {
    let tr = Translator::new("en-us");
    let text = format_report(&run(30.0, 60.0, 22.0, 50.0, 5000.0), &tr);
    for expected in [
        "Outdoor air:",
        "- Temperature: 30.0 °C",
        "- Relative humidity: 60.0 %",
        "- Absolute humidity: 16.03 g/kg",
        "- Temperature: 12.0 °C",
        "- Absolute humidity: 8.22 g/kg",
        "- Volume flow: 5000 m³/h",
        "- Mass flow: 6000 kg/h",
        "- Humidity difference: 7.81 g/kg",
        "- Condensate: 46.86 kg/h",
        "- Cooling capacity: 63.89 kW",
        "- Chilled-water flow (ΔT 5.0 K): 11.01 m³/h",
        "- Temperature rise: 10.0 K",
        "- Heating capacity: 17.00 kW",
        "- Heating-water flow (ΔT 20.0 K): 0.73 m³/h",
    ] {
        assert!(text.contains(expected), "missing `{expected}` in\n{text}");
    }
    assert!(!text.contains("Warnings:"));
}

#[test]
fn german_report_uses_german_headings() {
    let tr = Translator::new("de-de");
    let text = format_report(&run(30.0, 60.0, 22.0, 50.0, 5000.0), &tr);
    assert!(text.contains("Zustand nach dem Kühler:"));
    assert!(text.contains("- Kälteleistung: 63.89 kW"));
}

#[test]
fn zero_airflow_report_has_no_negative_zero() {
    let tr = Translator::new("en-us");
    // 건조한 외기: Δx < 0 이라 0 × 음수 = -0.0 이 나오는 경우
    let text = format_report(&run(5.0, 30.0, 22.0, 50.0, 0.0), &tr);
    assert!(!text.contains("-0.00"), "{text}");
    assert!(text.contains("- Condensate: 0.00 kg/h"));
    assert!(text.contains("Warnings:"));
}

#[test]
fn constants_listing_shows_defaults() {
    let tr = Translator::new("en-us");
    let text = format_constants(&ProcessConstants::default(), &tr);
    assert!(text.contains("- Assumed coil exit temperature: 12.0 °C"));
    assert!(text.contains("- Water specific heat: 4.18 kJ/(kg·K)"));
    assert!(text.contains("- Air density: 1.20 kg/m³"));
}

#[test]
fn errors_name_the_failing_field_or_state() {
    let tr = Translator::new("en-us");
    let mut fields = FormFields::default();
    for (field, value) in Field::ALL.into_iter().zip(["30", "60", "22", "", "5000"]) {
        *fields.get_mut(field) = value.into();
    }
    let err = calculate_report(&fields, &Config::default(), &tr).unwrap_err();
    assert_eq!(
        describe_error(&err, &tr),
        "Supply relative humidity [%]: value is missing"
    );

    *fields.get_mut(Field::SupplyRelativeHumidity) = "150".into();
    let err = calculate_report(&fields, &Config::default(), &tr).unwrap_err();
    assert!(matches!(err, ProcessError::Domain { stage: Stage::Supply, .. }));
    assert_eq!(
        describe_error(&err, &tr),
        "Supply air: relative humidity 150.0 % is outside 0–100 %"
    );
}

#[test]
fn chart_path_is_ordered_outdoor_coil_supply() {
    let res = run(30.0, 60.0, 22.0, 50.0, 5000.0);
    let path = ChartPath::from_result(&res);
    let stages: Vec<Stage> = path.points().iter().map(|p| p.stage).collect();
    assert_eq!(stages, vec![Stage::Outdoor, Stage::CoilExit, Stage::Supply]);

    let xy = path.as_xy();
    assert_eq!(xy[0], [res.outdoor.absolute_humidity_g_per_kg, 30.0]);
    assert_eq!(xy[1], [res.supply.absolute_humidity_g_per_kg, 12.0]);
    assert_eq!(xy[2], [res.supply.absolute_humidity_g_per_kg, 22.0]);
    assert!(path.clipped_stages().is_empty());
}

#[test]
fn chart_reports_points_outside_the_fixed_axes() {
    assert_eq!(HUMIDITY_AXIS_G_PER_KG, 0.0..=30.0);
    assert_eq!(TEMPERATURE_AXIS_C, 0.0..=40.0);
    let path = ChartPath::from_result(&run(45.0, 50.0, 22.0, 50.0, 5000.0));
    assert_eq!(path.clipped_stages(), vec![Stage::Outdoor]);
}

#[test]
fn overflowing_result_is_described() {
    let tr = Translator::new("en-us");
    let err = ProcessError::NonFiniteResult { quantity: "cooling_duty_kw" };
    assert_eq!(
        describe_error(&err, &tr),
        "Result cooling_duty_kw is too large to compute; check the airflow"
    );
}
