pub mod activity;
pub mod leagues;
pub mod rankings;
pub mod report;
