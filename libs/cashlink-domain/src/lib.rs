//! # Cashlink Domain Layer
//!
//! This crate contains the pure business logic behind the Cashlink cashback
//! relay. It follows hexagonal architecture principles:
//!
//! - **Intake**: validation and base64 preparation of user-selected files
//! - **Relay**: multipart encoding, authorization selection and response
//!   normalization for the upstream cashback API
//! - **OTP**: mobile number validation for the one-time-password lookup
//! - **Ports**: Trait definitions for external dependencies (file reads,
//!   upstream transport, OTP provider)
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (HTTP clients,
//! filesystem, web framework). All external dependencies are expressed as
//! traits (ports) that are implemented by adapter layers.
//!
//! ## Example
//!
//! ```rust
//! use cashlink_domain::intake::{FileDescriptor, InMemoryFile, IntakeService};
//!
//! # async fn example() {
//! let file = InMemoryFile::new(
//!     FileDescriptor::new("receipt.png", "image/png", 3),
//!     vec![1, 2, 3],
//! );
//! let payload = IntakeService::default().prepare(&file).await.unwrap();
//! assert_eq!(payload.base64, "AQID");
//! # }
//! ```

pub mod config;
pub mod intake;
pub mod otp;
pub mod relay;

// Re-export commonly used types
pub use config::UpstreamConfig;
pub use intake::{EncodedPayload, FileDescriptor, FileSource, IntakeService};
pub use otp::{MobileNumber, OtpProvider, OtpService};
pub use relay::{RelayCall, RelayService, UpstreamTransport};
