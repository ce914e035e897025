pub mod clean;
pub mod reverse;
pub mod sample;
