//! OTP domain module
//!
//! Validates the mobile number a one-time-password is requested for and
//! delegates the lookup to an external provider.

mod entity;
mod error;
mod ports;
mod service;

pub use entity::MobileNumber;
pub use error::{OtpError, Result};
pub use ports::OtpProvider;
pub use service::OtpService;
