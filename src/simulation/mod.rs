pub mod config;
pub mod demand;
pub mod engine;
pub mod kpi;
