//! Evaluation comparison and scoring engine for trichology clinics.

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;
pub mod telemetry;
