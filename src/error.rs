use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Cannot compute metrics for an empty process set")]
    EmptyInput,

    #[error("Invalid quantum {0}: must be greater than zero")]
    InvalidQuantum(u64),

    #[error("Process P{pid} has a zero burst time")]
    InvalidBurst { pid: u32 },

    #[error("Process id P{0} appears more than once")]
    DuplicateProcess(u32),

    #[error("Workload overflows the simulation clock: latest arrival plus total burst exceeds u64::MAX")]
    ClockOverflow,

    #[error("Process P{pid} has not completed ({remaining} units remaining)")]
    Incomplete { pid: u32, remaining: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Invalid process specification: {0}")]
    InvalidProcess(String),

    #[error("Invalid value for --{name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
