#[allow(non_snake_case)]
pub mod Reports;
#[allow(non_snake_case)]
pub mod Sorption;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
