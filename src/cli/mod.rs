//! Command implementations and terminal presentation

pub mod convert;
pub mod currencies;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;
pub mod view;
