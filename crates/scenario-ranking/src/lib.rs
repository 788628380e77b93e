//! Parameter assembly and engine output reshaping for forest treatment
//! scenario ranking.

pub mod config;
pub mod error;
pub mod forsys;
pub mod telemetry;
