//! External service clients.

pub mod otp;

pub use otp::{OtpClient, OtpError};
