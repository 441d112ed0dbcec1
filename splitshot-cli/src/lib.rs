//! Command line front end: reads the persisted inputs, applies overrides from the command
//! line and prints ranked shot patterns.

pub mod cli;
pub mod commands;
pub mod config;
pub mod table;
