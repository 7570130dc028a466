pub mod robots;
pub mod throttle;
