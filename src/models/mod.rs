pub mod activity;
pub mod filesystem;
pub mod volume;
