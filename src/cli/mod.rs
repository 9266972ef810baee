//! Terminal front end

pub mod list;
pub mod setup;
pub mod ui;
