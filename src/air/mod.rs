//! 습공기 물성 및 냉각/재열 공조 프로세스 계산.

pub mod chart;
pub mod humid_air;
pub mod input;
pub mod process;

pub use chart::{ChartPath, ChartPoint};
pub use humid_air::{
    absolute_humidity, enthalpy, relative_humidity, saturation_pressure_hpa, AirState,
    PhysicalDomainError, ATMOSPHERIC_PRESSURE_HPA,
};
pub use input::{FormFields, Field, InputErrorKind, InputParseError, ProcessInput};
pub use process::{
    compute_process, ProcessConstants, ProcessError, ProcessResult, ProcessWarning, Stage,
};
