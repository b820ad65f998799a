use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::OtpError;

/// A ten-digit mobile number
///
/// The only way to build one is [`MobileNumber::parse`], so a value of this
/// type is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Number of digits of a valid mobile number
    pub const DIGITS: usize = 10;

    /// Parse a mobile number: exactly ten ASCII digits, nothing else
    pub fn parse(input: &str) -> Result<Self, OtpError> {
        if input.len() == Self::DIGITS && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(OtpError::InvalidMobile)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = OtpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MobileNumber> for String {
    fn from(mobile: MobileNumber) -> Self {
        mobile.0
    }
}
