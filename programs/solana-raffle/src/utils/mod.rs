pub mod math;
pub mod upkeep;
