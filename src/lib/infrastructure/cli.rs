//! Command-line arguments

use std::ffi::OsString;

use clap::{ArgAction, CommandFactory, Parser};

use crate::domain::sending::{
    config::{DEFAULT_BODY, DEFAULT_PORT, DEFAULT_SUBJECT, DEFAULT_TIMEOUT_SECONDS},
    FailurePolicy, SendConfig,
};

/// Sends a single HTML email over SMTP.
///
/// Flags may be written with one or two dashes (`-host`, `--host`) and take
/// their value either after `=` or as the next argument. Boolean flags only
/// take a value after `=`.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    /// FROM email address
    #[clap(long, allow_hyphen_values = true, default_value = "")]
    pub from: String,

    /// SMTP server host
    #[clap(long, allow_hyphen_values = true, default_value = "")]
    pub host: String,

    /// SMTP server port
    #[clap(long, allow_hyphen_values = true, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SMTP username
    #[clap(long, allow_hyphen_values = true, default_value = "")]
    pub user: String,

    /// SMTP password
    #[clap(long, allow_hyphen_values = true, default_value = "")]
    pub password: String,

    /// Email content, sent as HTML
    #[clap(long, allow_hyphen_values = true, default_value = DEFAULT_BODY)]
    pub email: String,

    /// Email subject
    #[clap(long, allow_hyphen_values = true, default_value = DEFAULT_SUBJECT)]
    pub subject: String,

    /// SMTP timeout, in seconds
    #[clap(long, allow_hyphen_values = true, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// TO email addresses separated by ';'
    #[clap(long, allow_hyphen_values = true, default_value = "")]
    pub to: String,

    /// Connect with SSL/TLS from the start instead of STARTTLS
    #[clap(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub ssl: bool,

    /// Refuse to send if any single check fails
    #[clap(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub strict: bool,
}

impl Args {
    /// The send configuration described by these arguments
    pub fn send_config(&self) -> SendConfig {
        SendConfig::default()
            .with_from(self.from.as_str())
            .with_recipients(&self.to)
            .with_subject(self.subject.as_str())
            .with_body(self.email.as_str())
            .with_host(self.host.as_str())
            .with_port(self.port)
            .with_credentials(self.user.as_str(), self.password.as_str())
            .with_ssl(self.ssl)
            .with_timeout_seconds(self.timeout)
    }

    /// How validation errors are treated
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.strict {
            FailurePolicy::AnyError
        } else {
            FailurePolicy::MoreThanOne
        }
    }
}

/// Rewrites `-name` and `-name=value` to their `--` form for every long flag
/// [`Args`] knows about.
///
/// The argument after a value-taking flag written without `=` is its value and
/// is left alone, as is everything after a bare `--`.
fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Args::command();
    let mut longs: Vec<(&str, bool)> = command
        .get_arguments()
        .filter_map(|arg| {
            arg.get_long()
                .map(|long| (long, !arg.is_require_equals_set()))
        })
        .collect();
    longs.extend([("help", false), ("version", false)]);

    let mut terminated = false;
    let mut value_next = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if terminated {
                return arg;
            }

            if value_next {
                value_next = false;
                return arg;
            }

            let Some(s) = arg.to_str() else {
                return arg;
            };

            if s == "--" {
                terminated = true;
                return arg;
            }

            let Some(rest) = s.strip_prefix('-') else {
                return arg;
            };
            let (dashes, rest) = match rest.strip_prefix('-') {
                Some(rest) => (2, rest),
                None => (1, rest),
            };
            let (name, inline_value) = match rest.split_once('=') {
                Some((name, _)) => (name, true),
                None => (rest, false),
            };

            let Some(&(_, takes_value)) = longs.iter().find(|(long, _)| *long == name) else {
                return arg;
            };

            value_next = takes_value && !inline_value;

            if dashes == 1 {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}

/// Parses a raw argument list, program name first.
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Args::try_parse_from(normalize(args))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        parse_args(std::iter::once("smtp-send").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() -> TestResult {
        let args = parse(&[])?;
        let config = args.send_config();

        assert_eq!(config.from_address(), "");
        assert_eq!(config.to_addresses(), [""]);
        assert_eq!(config.smtp_host(), "");
        assert_eq!(config.smtp_port(), 25);
        assert_eq!(config.username(), "");
        assert_eq!(config.password(), "");
        assert_eq!(config.body(), "This is a test mail");
        assert_eq!(config.subject(), "test mail");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.use_ssl());
        assert_eq!(args.failure_policy(), FailurePolicy::MoreThanOne);

        Ok(())
    }

    #[test]
    fn test_single_dash_flags() -> TestResult {
        let config = parse(&[
            "-from=a@b.com",
            "-to=c@d.com;e@f.com",
            "-host=smtp.example.com",
            "-subject=Hi",
            "-email=Hello",
        ])?
        .send_config();

        assert_eq!(config.from_address(), "a@b.com");
        assert_eq!(config.to_addresses(), ["c@d.com", "e@f.com"]);
        assert_eq!(config.smtp_host(), "smtp.example.com");
        assert_eq!(config.subject(), "Hi");
        assert_eq!(config.body(), "Hello");

        Ok(())
    }

    #[test]
    fn test_separate_values_and_double_dash() -> TestResult {
        let config = parse(&[
            "-host",
            "mail.example.com",
            "--port",
            "587",
            "-user",
            "me",
            "--password=secret",
            "-timeout",
            "30",
        ])?
        .send_config();

        assert_eq!(config.smtp_host(), "mail.example.com");
        assert_eq!(config.smtp_port(), 587);
        assert_eq!(config.username(), "me");
        assert_eq!(config.password(), "secret");
        assert_eq!(config.timeout(), Duration::from_secs(30));

        Ok(())
    }

    #[test]
    fn test_empty_value() -> TestResult {
        let config = parse(&["-host=", "-to="])?.send_config();

        assert_eq!(config.smtp_host(), "");
        assert_eq!(config.to_addresses(), [""]);

        Ok(())
    }

    #[test]
    fn test_ssl_forms() -> TestResult {
        assert!(parse(&["-ssl"])?.ssl);
        assert!(parse(&["-ssl=true"])?.ssl);
        assert!(parse(&["--ssl=true"])?.ssl);
        assert!(!parse(&["-ssl=false"])?.ssl);
        assert!(!parse(&[])?.ssl);

        Ok(())
    }

    #[test]
    fn test_strict_selects_any_error_policy() -> TestResult {
        assert_eq!(parse(&["-strict"])?.failure_policy(), FailurePolicy::AnyError);
        assert_eq!(
            parse(&["-strict=false"])?.failure_policy(),
            FailurePolicy::MoreThanOne
        );

        Ok(())
    }

    #[test]
    fn test_values_after_terminator_are_not_rewritten() {
        let args = normalize(["smtp-send", "-host=a", "--", "-from=x"]);

        assert_eq!(args, ["smtp-send", "--host=a", "--", "-from=x"]);
    }

    #[test]
    fn test_unknown_single_dash_flag_is_left_alone() {
        let args = normalize(["smtp-send", "-x", "-bogus=1", "-to=a@b.com"]);

        assert_eq!(args, ["smtp-send", "-x", "-bogus=1", "--to=a@b.com"]);
    }

    #[test]
    fn test_values_starting_with_a_dash() -> TestResult {
        let args = parse(&["-email", "- item one", "-subject", "-x", "--user", "-me"])?;

        assert_eq!(args.email, "- item one");
        assert_eq!(args.subject, "-x");
        assert_eq!(args.user, "-me");

        Ok(())
    }

    #[test]
    fn test_flag_name_as_value_is_not_rewritten() -> TestResult {
        assert_eq!(
            normalize(["smtp-send", "-subject", "-host", "-host=h"]),
            ["smtp-send", "--subject", "-host", "--host=h"]
        );

        let args = parse(&["-subject", "-host", "-host=smtp.example.com"])?;

        assert_eq!(args.subject, "-host");
        assert_eq!(args.host, "smtp.example.com");

        Ok(())
    }

    #[test]
    fn test_bool_flag_does_not_swallow_next_argument() {
        assert_eq!(
            normalize(["smtp-send", "-ssl", "-host=h"]),
            ["smtp-send", "--ssl", "--host=h"]
        );
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(parse(&["-bogus=1"]).is_err());
    }

    #[test]
    fn test_non_numeric_port_is_an_error() {
        assert!(parse(&["-port=abc"]).is_err());
    }
}
