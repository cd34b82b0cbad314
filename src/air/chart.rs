//! h-x 선도에 그릴 상태 경로(외기 → 코일 출구 → 급기).

use std::ops::RangeInclusive;

use super::process::{ProcessResult, Stage};

/// 가로축: 절대습도 [g/kg]
pub const HUMIDITY_AXIS_G_PER_KG: RangeInclusive<f64> = 0.0..=30.0;
/// 세로축: 건구온도 [°C]
pub const TEMPERATURE_AXIS_C: RangeInclusive<f64> = 0.0..=40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub stage: Stage,
    pub absolute_humidity_g_per_kg: f64,
    pub temperature_c: f64,
}

impl ChartPoint {
    /// 고정 축 범위 안에 들어오는지.
    pub fn is_within_axes(&self) -> bool {
        HUMIDITY_AXIS_G_PER_KG.contains(&self.absolute_humidity_g_per_kg)
            && TEMPERATURE_AXIS_C.contains(&self.temperature_c)
    }
}

/// 처리 순서가 고정된 세 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPath {
    points: [ChartPoint; 3],
}

impl ChartPath {
    pub fn from_result(result: &ProcessResult) -> Self {
        let points = result.states().map(|(stage, state)| ChartPoint {
            stage,
            absolute_humidity_g_per_kg: state.absolute_humidity_g_per_kg,
            temperature_c: state.temperature_c,
        });
        Self { points }
    }

    pub fn points(&self) -> &[ChartPoint; 3] {
        &self.points
    }

    /// 플롯 라이브러리에 넘길 `[x, y]` = `[절대습도, 온도]` 배열.
    pub fn as_xy(&self) -> [[f64; 2]; 3] {
        self.points
            .map(|p| [p.absolute_humidity_g_per_kg, p.temperature_c])
    }

    /// 축 범위 밖에 있어 그래프에서 잘리는 상태들.
    pub fn clipped_stages(&self) -> Vec<Stage> {
        self.points
            .iter()
            .filter(|p| !p.is_within_axes())
            .map(|p| p.stage)
            .collect()
    }
}

impl From<&ProcessResult> for ChartPath {
    fn from(result: &ProcessResult) -> Self {
        ChartPath::from_result(result)
    }
}
