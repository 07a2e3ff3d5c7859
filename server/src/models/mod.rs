pub mod fixture;
pub mod participant;
pub mod prediction;
