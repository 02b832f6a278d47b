//! Server configuration
//!
//! Everything is read from environment variables (a `.env` file is loaded first, if present). All secrets and
//! credentials are required: if any are missing, [`ServerConfig::try_from_env`] fails and the server does not start.
use std::{env, time::Duration};

use lettre::message::Mailbox;
use log::*;
use price_watch_engine::{DEFAULT_ALERT_THRESHOLD_PERCENT, DEFAULT_NOTIFICATION_TIMEOUT};
use rust_decimal::Decimal;
use shopify_tools::ShopifyConfig as ShopifyApiConfig;
use spw_common::{parse_boolean_flag, Secret};

use crate::errors::ServerError;

const DEFAULT_SPW_HOST: &str = "127.0.0.1";
const DEFAULT_SPW_PORT: u16 = 3000;
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Price drops strictly larger than this percentage trigger an alert.
    pub alert_threshold_percent: Decimal,
    pub shopify_config: ShopifyConfig,
    pub email_config: EmailConfig,
}

#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    pub api: ShopifyApiConfig,
    /// The key Shopify uses to sign webhook calls.
    pub hmac_secret: Secret<String>,
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    /// If false, the SMTP connection is not encrypted. Only use this against a local relay.
    pub starttls: bool,
    pub username: String,
    pub password: Secret<String>,
    pub from: Mailbox,
    /// Where alerts go. Defaults to the SMTP user's own address.
    pub to: Mailbox,
    /// Upper bound on the time spent delivering a single alert.
    pub timeout: Duration,
}

impl ServerConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        Self::try_from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration, reading variables through `vars`.
    pub fn try_from_vars<F>(vars: F) -> Result<Self, ServerError>
    where F: Fn(&str) -> Option<String> {
        let host = vars("SPW_HOST").unwrap_or_else(|| DEFAULT_SPW_HOST.into());
        let port = vars("SPW_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SPW_PORT. {e} Using the default, {DEFAULT_SPW_PORT}, instead."
                    );
                    DEFAULT_SPW_PORT
                })
            })
            .unwrap_or(DEFAULT_SPW_PORT);
        let alert_threshold_percent = match vars("SPW_ALERT_THRESHOLD_PERCENT") {
            Some(s) => s.trim().parse::<Decimal>().ok().filter(|d| !d.is_sign_negative()).ok_or_else(|| {
                ServerError::ConfigurationError(format!(
                    "SPW_ALERT_THRESHOLD_PERCENT must be a non-negative number, not {s}"
                ))
            })?,
            None => {
                info!(
                    "🪛️ SPW_ALERT_THRESHOLD_PERCENT is not set. Alerting on drops over \
                     {DEFAULT_ALERT_THRESHOLD_PERCENT}%."
                );
                Decimal::from(DEFAULT_ALERT_THRESHOLD_PERCENT)
            },
        };
        let shopify_config = ShopifyConfig::try_from_vars(&vars)?;
        let email_config = EmailConfig::try_from_vars(&vars)?;
        Ok(Self { host, port, alert_threshold_percent, shopify_config, email_config })
    }
}

impl ShopifyConfig {
    pub fn try_from_vars<F>(vars: &F) -> Result<Self, ServerError>
    where F: Fn(&str) -> Option<String> {
        let api = ShopifyApiConfig::try_from_vars(vars).map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
        let hmac_secret = Secret::new(required_var(vars, "SPW_SHOPIFY_HMAC_SECRET")?);
        Ok(Self { api, hmac_secret })
    }
}

impl EmailConfig {
    pub fn try_from_vars<F>(vars: &F) -> Result<Self, ServerError>
    where F: Fn(&str) -> Option<String> {
        let host = required_var(vars, "SPW_EMAIL_HOST")?;
        let port = match vars("SPW_EMAIL_PORT") {
            Some(s) => s
                .trim()
                .parse::<u16>()
                .map_err(|e| ServerError::ConfigurationError(format!("Invalid SPW_EMAIL_PORT ({s}). {e}")))?,
            None => DEFAULT_SMTP_PORT,
        };
        let starttls = parse_boolean_flag(vars("SPW_EMAIL_STARTTLS"), true);
        if !starttls {
            warn!("🪛️ STARTTLS is disabled. Alert emails and SMTP credentials will be sent in the clear.");
        }
        let username = required_var(vars, "SPW_EMAIL_USER")?;
        let password = Secret::new(required_var(vars, "SPW_EMAIL_PASS")?);
        let from = required_mailbox(vars, "SPW_EMAIL_FROM")?;
        let to = match vars("SPW_EMAIL_TO") {
            Some(_) => required_mailbox(vars, "SPW_EMAIL_TO")?,
            None => {
                info!("🪛️ SPW_EMAIL_TO is not set. Price alerts will be sent to {username}.");
                username.parse::<Mailbox>().map_err(|e| {
                    ServerError::ConfigurationError(format!(
                        "SPW_EMAIL_TO is not set and SPW_EMAIL_USER ({username}) is not a valid address. {e}"
                    ))
                })?
            },
        };
        let timeout = match vars("SPW_EMAIL_TIMEOUT") {
            Some(s) => match s.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ServerError::ConfigurationError("SPW_EMAIL_TIMEOUT must be at least 1 second".into()))
                },
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => return Err(ServerError::ConfigurationError(format!("Invalid SPW_EMAIL_TIMEOUT ({s}). {e}"))),
            },
            None => DEFAULT_NOTIFICATION_TIMEOUT,
        };
        Ok(Self { host, port, starttls, username, password, from, to, timeout })
    }
}

fn required_var<F>(vars: &F, name: &str) -> Result<String, ServerError>
where F: Fn(&str) -> Option<String> {
    match vars(name) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(_) => Err(ServerError::ConfigurationError(format!("{name} is set, but empty"))),
        None => Err(ServerError::ConfigurationError(format!("{name} is not set"))),
    }
}

fn required_mailbox<F>(vars: &F, name: &str) -> Result<Mailbox, ServerError>
where F: Fn(&str) -> Option<String> {
    let value = required_var(vars, name)?;
    value
        .parse::<Mailbox>()
        .map_err(|e| ServerError::ConfigurationError(format!("{name} is not a valid address. {e}")))
}
