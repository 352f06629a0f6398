pub mod pricing;
pub mod proximity;
pub mod queue;
