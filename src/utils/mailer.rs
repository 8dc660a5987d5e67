//! Candidate notifications.
//!
//! Delivery is fire-and-forget: the request that triggers a mail never waits
//! for the SMTP round trip, and a failed delivery is only logged.

use chrono::{DateTime, Local, TimeDelta};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::{PortalError, Result};

/// Days between shortlisting and the interview slot offered in the mail.
pub const INTERVIEW_AFTER_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn shortlisted(to: &str, job_title: &str, now: DateTime<Local>) -> Notification {
        let interview = now + TimeDelta::days(INTERVIEW_AFTER_DAYS);
        let post = if job_title.is_empty() {
            "the advertised position"
        } else {
            job_title
        };
        Notification {
            to: to.to_string(),
            subject: "Your application was shortlisted".to_string(),
            body: format!(
                "You have been shortlisted for the post of {}.\nYour interview is scheduled on {}.",
                post,
                interview.format("%A, %d %B %Y")
            ),
        }
    }

    pub fn rejected(to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            subject: "Your application".to_string(),
            body: "Thank you for your interest.\n\
                   We cannot move further with your application.\n\
                   All the best for the future."
                .to_string(),
        }
    }
}

pub trait Mailer: Send + Sync {
    fn send(&self, notification: Notification);
}

/// Used when no SMTP relay is configured.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, notification: Notification) {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "mail delivery disabled, notification not sent"
        );
    }
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(server: &str, user: &str, pass: &str, from: &str) -> Result<SmtpMailer> {
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| PortalError::Mail(format!("invalid sender {from}: {e}")))?;
        let transport = SmtpTransport::relay(server)
            .map_err(|e| PortalError::Mail(e.to_string()))?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();
        Ok(SmtpMailer { transport, from })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, notification: Notification) {
        let transport = self.transport.clone();
        let from = self.from.clone();

        actix_web::rt::task::spawn_blocking(move || {
            let message = match build_message(from, &notification) {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(to = %notification.to, error = %e, "could not build mail");
                    return;
                }
            };
            match transport.send(&message) {
                Ok(_) => tracing::info!(to = %notification.to, "mail sent"),
                Err(e) => tracing::error!(to = %notification.to, error = %e, "could not send mail"),
            }
        });
    }
}

fn build_message(from: Mailbox, notification: &Notification) -> Result<Message> {
    let to = notification
        .to
        .parse::<Mailbox>()
        .map_err(|e| PortalError::Mail(format!("invalid recipient: {e}")))?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(notification.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())
        .map_err(|e| PortalError::Mail(e.to_string()))
}
