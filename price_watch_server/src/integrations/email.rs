//! Email delivery of price alerts over SMTP.
//!
//! The SMTP transport is built from [`EmailConfig`] when the notifier is created, but it does not connect to the
//! relay until the first alert is sent. Each delivery is bounded by the configured timeout.
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
};
use log::*;
use price_watch_engine::{price_types::PriceAlert, AlertNotifier, NotificationError};

use crate::config::EmailConfig;

#[derive(Clone)]
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self, NotificationError> {
        let credentials = Credentials::new(config.username.clone(), config.password.reveal().clone());
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotificationError::ConfigurationError(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let transport = builder.port(config.port).credentials(credentials).timeout(Some(config.timeout)).build();
        debug!("📧️ SMTP transport configured for {}:{}", config.host, config.port);
        Ok(Self { transport, from: config.from.clone(), to: config.to.clone() })
    }

    pub fn recipient(&self) -> &Mailbox {
        &self.to
    }

    pub fn build_message(&self, alert: &PriceAlert) -> Result<Message, NotificationError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(alert.subject())
            .header(ContentType::TEXT_HTML)
            .body(alert_html(alert))
            .map_err(|e| NotificationError::MessageError(e.to_string()))
    }
}

impl AlertNotifier for EmailNotifier {
    async fn send_alert(&self, alert: &PriceAlert) -> Result<(), NotificationError> {
        let message = self.build_message(alert)?;
        info!("📧️ Sending price alert for {} to {}", alert.title, self.to);
        let response =
            self.transport.send(message).await.map_err(|e| NotificationError::DeliveryError(e.to_string()))?;
        debug!("📧️ SMTP relay accepted the alert. Code: {}", response.code());
        Ok(())
    }
}

/// The HTML body of an alert email.
pub fn alert_html(alert: &PriceAlert) -> String {
    format!(
        "<h2>Price Decrease Alert</h2>\n<p><strong>Product:</strong> {}</p>\n<p><strong>Old Price:</strong> \
         ${:.2}</p>\n<p><strong>New Price:</strong> ${:.2}</p>\n<p><strong>Decrease:</strong> {:.2}%</p>\n",
        escape_html(&alert.title),
        alert.old_price,
        alert.new_price,
        alert.decrease_percent
    )
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use spw_common::Secret;

    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            host: "localhost".into(),
            port: 2525,
            starttls: false,
            username: "alerts".into(),
            password: Secret::new("password".into()),
            from: "Price Watch <alerts@example.com>".parse().unwrap(),
            to: "owner@example.com".parse().unwrap(),
            timeout: Duration::from_secs(1),
        }
    }

    fn alert() -> PriceAlert {
        PriceAlert::for_price_change("Tom & Jerry Mug", Decimal::from(100), Decimal::from(79), Decimal::from(20))
            .unwrap()
    }

    #[test]
    fn html_body() {
        let html = alert_html(&alert());
        assert_eq!(
            html,
            "<h2>Price Decrease Alert</h2>\n<p><strong>Product:</strong> Tom &amp; Jerry Mug</p>\n<p><strong>Old \
             Price:</strong> $100.00</p>\n<p><strong>New Price:</strong> $79.00</p>\n<p><strong>Decrease:</strong> \
             21.00%</p>\n"
        );
    }

    #[test]
    fn message_headers() {
        let notifier = EmailNotifier::new(&config()).unwrap();
        assert_eq!(notifier.recipient().email.to_string(), "owner@example.com");
        let message = notifier.build_message(&alert()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Price Alert: Tom & Jerry Mug"));
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Content-Type: text/html"));
    }
}
