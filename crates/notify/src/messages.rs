//! Builders for the emails the service sends.

use cravex_core::support::ContactMessage;
use cravex_core::types::DbId;

use crate::email::OutgoingEmail;

/// Login code email for `to`.
pub fn login_code(to: &str, code: &str, ttl_mins: i64) -> OutgoingEmail {
    OutgoingEmail {
        to: vec![to.to_string()],
        reply_to: None,
        subject: "Login Verification Code - CRAVEX".to_string(),
        body: format!(
            "Your CRAVEX verification code is {code}.\n\n\
             It expires in {ttl_mins} minutes. If you did not request it, you can ignore this email."
        ),
    }
}

/// Support request forwarded to the support inbox, replying to the submitter.
pub fn support_request(
    recipients: &[String],
    message: &ContactMessage,
    user_id: Option<DbId>,
) -> OutgoingEmail {
    let account = match user_id {
        Some(id) => format!("Account: {id}\n"),
        None => String::new(),
    };
    OutgoingEmail {
        to: recipients.to_vec(),
        reply_to: Some(message.email.clone()),
        subject: format!("New contact from {} - CRAVEX", message.name),
        body: format!(
            "From: {} <{}>\n{account}\n{}",
            message.name, message.email, message.message
        ),
    }
}
