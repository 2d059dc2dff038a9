pub mod constraints;
pub mod costs;
pub mod demand;
pub mod queues;
