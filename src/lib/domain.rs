//! Domain layer: validation, message construction and the mailer seam

pub mod communication;
pub mod sending;
