pub mod debt;
pub mod rate;
pub mod schedule;
