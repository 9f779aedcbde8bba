//! Infrastructure layer: command-line parsing and the SMTP transport

pub mod cli;
pub mod email;
