#![doc = include_str!("../README.md")]

pub mod executor;
pub mod generator;
pub mod invoker;

mod error;

pub use error::HarnessError;
pub use executor::run_scenario;
pub use invoker::{HttpInvoker, InvokeOutcome, Invoker};

pub use linkload_core as core;

pub mod prelude {
    pub use crate::error::HarnessError;
    pub use crate::executor::run_scenario;
    pub use crate::generator::fixed_url;
    pub use crate::invoker::{HttpInvoker, InvokeError, InvokeOutcome, Invoker};
    pub use linkload_core::report::{self, Column, ReportRow};
    pub use linkload_core::{
        LatencyThresholds, MetricCollector, MetricSnapshot, RequestSample, ScenarioSpec,
        TargetConfig,
    };
}
