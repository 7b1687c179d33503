pub mod analytic;
pub mod context;
pub mod curve;
pub mod duration_curve;
pub mod enumeration;
pub mod error;
pub mod integrator;
pub mod objective;
pub mod observation;
pub mod period;
pub mod plant;
pub mod rank;
pub mod schedule;
pub mod solver;
#[cfg(test)]
mod synthetic;
