pub mod clock;
pub mod errors;
pub mod format;
pub mod models;
pub mod reply;
