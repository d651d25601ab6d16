//! Out-of-band email for login codes and support requests.
//!
//! - [`email`] -- the [`email::Mailer`] seam, SMTP delivery, and a log-only fallback.
//! - [`messages`] -- builders for the messages the service sends.

pub mod email;
pub mod messages;

pub use email::{EmailConfig, EmailError, LogMailer, Mailer, OutgoingEmail, SmtpMailer};
