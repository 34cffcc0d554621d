//! Contact form validation and the form-urlencoded payload sent to the sheet
//! script.

use gloo_net::http::Request;
use thiserror::Error;
use web_sys::RequestMode;

use crate::config;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid Phone Number (must be exactly 10 digits).")]
    InvalidPhone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, phone: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Checks fields in display order and reports the first problem.
    pub fn validate(&self) -> std::result::Result<(), ContactError> {
        if self.name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if !self.email.contains('@') {
            return Err(ContactError::InvalidEmail);
        }
        if self.phone.len() != 10 || !self.phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContactError::InvalidPhone);
        }
        Ok(())
    }

    pub fn form_body(&self, timestamp: &str) -> String {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("message", self.message.as_str()),
            ("timestamp", timestamp),
        ]
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Posts the submission in `no-cors` mode. The script answers with an opaque
/// response, so reaching the endpoint at all is the only success signal.
pub async fn submit(submission: &ContactSubmission, timestamp: &str) -> Result<()> {
    submission.validate()?;
    Request::post(config::get_form_endpoint())
        .mode(RequestMode::NoCors)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(submission.form_body(timestamp))
        .send()
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_reports_first_problem() {
        let ok = ContactSubmission::new(" Priya ", "priya@example.com", "9876543210", "Need a reel");
        assert_eq!(ok.validate(), Ok(()));
        assert_eq!(ok.name, "Priya");

        let no_name = ContactSubmission::new("  ", "bad", "1", "");
        assert_eq!(no_name.validate(), Err(ContactError::MissingName));

        let bad_email = ContactSubmission::new("Priya", "priya.example.com", "9876543210", "");
        assert_eq!(bad_email.validate(), Err(ContactError::InvalidEmail));
        assert_eq!(
            ContactSubmission::new("Priya", " ", "9876543210", "").validate(),
            Err(ContactError::InvalidEmail)
        );
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        for phone in ["987654321", "98765432100", "98765-4321", "+919876543", "९८७६५४३२१०"] {
            let s = ContactSubmission::new("Priya", "p@x.in", phone, "");
            assert_eq!(s.validate(), Err(ContactError::InvalidPhone), "{}", phone);
        }
    }

    #[test]
    fn error_messages_match_alert_copy() {
        assert_eq!(ContactError::MissingName.to_string(), "Please enter your name.");
        assert_eq!(
            ContactError::InvalidPhone.to_string(),
            "Please enter a valid Phone Number (must be exactly 10 digits)."
        );
    }

    #[test]
    fn form_body_is_urlencoded() {
        let s = ContactSubmission::new("Priya K", "p@x.in", "9876543210", "Hi & bye");
        assert_eq!(
            s.form_body("1/2/2024, 10:00:00"),
            "name=Priya%20K&email=p%40x.in&phone=9876543210&message=Hi%20%26%20bye&timestamp=1%2F2%2F2024%2C%2010%3A00%3A00"
        );
    }
}
