pub mod commands;
pub mod document;
pub mod error;
pub mod logging;
pub mod profiles;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
