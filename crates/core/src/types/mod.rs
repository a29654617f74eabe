//! Core types for the Boutique back-office.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod page;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use page::{ListParams, Page, PageMeta};
pub use phone::{Phone, PhoneError};
pub use status::OrderStatus;
