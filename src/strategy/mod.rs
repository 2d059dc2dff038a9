pub mod optimization;
pub mod policy;
