//! HTTP handlers

pub mod otp;
pub mod proxy;
