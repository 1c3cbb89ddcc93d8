use thiserror::Error;

pub const FALLBACK_REJECTION: &str = "Action rejected by server";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Please enter a valid raise amount.")]
    InvalidRaiseAmount { entered: String },
    #[error("{}", .0.as_deref().unwrap_or(FALLBACK_REJECTION))]
    Rejected(Option<String>),
}

impl Error {
    /// Text shown to the player in a blocking notice.
    pub fn alert_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_raise_amount_uses_fixed_message() {
        let error = Error::InvalidRaiseAmount {
            entered: "-3".to_string(),
        };
        assert_eq!(error.alert_message(), "Please enter a valid raise amount.");
    }

    #[test]
    fn rejection_prefers_server_message() {
        assert_eq!(
            Error::Rejected(Some("Not your turn".to_string())).alert_message(),
            "Not your turn"
        );
        assert_eq!(Error::Rejected(None).alert_message(), FALLBACK_REJECTION);
    }
}
