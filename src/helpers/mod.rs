//! Helper functions

pub mod date;
