//! CPU scheduling policy simulator.
//!
//! Runs a fixed, known-in-advance workload under round robin, non-preemptive
//! shortest job first and preemptive priority scheduling, and reports
//! per-process timings along with aggregate metrics.

pub mod config;
pub mod error;
pub mod logger;
pub mod scheduler;

pub use scheduler::{
    Makespan, Metrics, Policy, PolicyReport, Process, Schedule, Scheduler, Simulation,
};
