#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends a single email over SMTP

use std::process::ExitCode;

use smtp_send::{
    domain::sending::{MailService, SendError},
    infrastructure::{
        cli::parse_args,
        email::smtp::{SMTPConfig, SMTPMailer},
    },
};
use tracing::{debug, error};

#[mutants::skip]
fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let config = args.send_config();
    debug!("{:?}", config);

    let service = MailService::new(
        SMTPMailer::new(SMTPConfig::from(&config)),
        args.failure_policy(),
    );

    match service.send(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                SendError::ValidationFailed(errors) => {
                    error!("rejected {} invalid input(s)", errors.len())
                }
                SendError::DeliveryFailed(cause) => error!("delivery failed: {}", cause),
            }

            eprintln!("{}", e);

            ExitCode::FAILURE
        }
    }
}
