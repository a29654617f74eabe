//! Domain models for the admin API.
//!
//! Wire names follow the dashboard's existing JSON contract (camelCase keys,
//! `user` for the populated customer on orders), so every model serializes
//! with `rename_all = "camelCase"`.

pub mod newsletter;
pub mod order;
pub mod product;
pub mod session;
pub mod user;
pub mod verification;

pub use newsletter::Subscriber;
pub use order::{Order, OrderCustomer, OrderWithCustomer, ShippingInfo};
pub use product::{Product, ProductInput};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, User};
pub use verification::VerificationCode;
