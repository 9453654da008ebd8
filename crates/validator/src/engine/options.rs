//! Validator configuration

use serde::{Deserialize, Serialize};

use crate::foundation::{Failure, RuleFault};

/// Environment variable read by [`ValidatorOptions::from_env`].
pub const DEVELOPER_MODE_ENV: &str = "FORMGUARD_DEVELOPER_MODE";

const DEFAULT_UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred during input validation";

/// How a validator reports rule faults.
///
/// ```rust,ignore
/// let options = ValidatorOptions::from_json(r#"{"developer_mode": true}"#)?;
/// assert_eq!(
///     options.unexpected_error_message,
///     "An unexpected error occurred during input validation"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Append the fault text to the generic message.
    pub developer_mode: bool,
    /// Message shown when a rule fails unexpectedly.
    pub unexpected_error_message: String,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            developer_mode: false,
            unexpected_error_message: DEFAULT_UNEXPECTED_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl ValidatorOptions {
    /// Parses options from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `input` is not a valid options object.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(input)?;
        serde_json::from_value(serde_json::Value::Object(object))
    }

    /// Defaults, with developer mode switched on when
    /// `FORMGUARD_DEVELOPER_MODE` is `1`, `true`, `yes` or `on`.
    #[must_use]
    pub fn from_env() -> Self {
        let developer_mode = std::env::var(DEVELOPER_MODE_ENV)
            .is_ok_and(|raw| parse_flag(&raw));
        Self {
            developer_mode,
            ..Self::default()
        }
    }

    /// Sets [`ValidatorOptions::developer_mode`].
    #[must_use]
    pub fn developer_mode(mut self, on: bool) -> Self {
        self.developer_mode = on;
        self
    }

    /// Sets [`ValidatorOptions::unexpected_error_message`].
    #[must_use]
    pub fn unexpected_error_message(mut self, message: impl Into<String>) -> Self {
        self.unexpected_error_message = message.into();
        self
    }

    /// Turns a rule fault into the failure shown to the user.
    #[must_use]
    pub fn fault_failure(&self, fault: &RuleFault) -> Failure {
        let message = if self.developer_mode {
            format!("{}: {fault}", self.unexpected_error_message)
        } else {
            self.unexpected_error_message.clone()
        };
        Failure::new("unexpected_error", message)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
