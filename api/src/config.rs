use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use crate::adapters::SmtpConfig;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub smtp: SmtpConfig,
    /// Sender address of outgoing mail
    pub mail_from: String,
    pub template_dir: String,
    /// Template wrapped around confirmation mails; `None` sends the bare body
    pub confirmation_template: Option<String>,
    pub session_lifetime: chrono::Duration,
    /// Marks the session cookie Secure
    pub in_production: bool,
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let confirmation_template = env::var("CONFIRMATION_TEMPLATE")
            .unwrap_or_else(|_| "basic.html".to_string());

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: parse_var("SMTP_PORT", 1025)?,
                connect_timeout: Duration::from_secs(parse_var("MAIL_CONNECT_TIMEOUT_SECS", 10)?),
                send_timeout: Duration::from_secs(parse_var("MAIL_SEND_TIMEOUT_SECS", 10)?),
            },
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| "me@here.com".to_string()),
            template_dir: env::var("TEMPLATE_DIR")
                .unwrap_or_else(|_| "./email-templates".to_string()),
            confirmation_template: (!confirmation_template.trim().is_empty())
                .then_some(confirmation_template),
            session_lifetime: chrono::Duration::hours(parse_var("SESSION_LIFETIME_HOURS", 24)?),
            in_production: parse_var("IN_PRODUCTION", false)?,
        })
    }
}
