//! Request and response bodies of the HTTP API

pub mod otp;
pub mod proxy;
