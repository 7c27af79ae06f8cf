pub mod aggregate;
pub mod backup;
pub mod calendar;
pub mod clock;
pub mod log;
pub mod report;
