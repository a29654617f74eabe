//! Integration tests for the boutique back-office API.
//!
//! The tests in `tests/` exercise the running HTTP server end to end and are
//! ignored by default because they need a live environment:
//!
//! ```bash
//! # Start PostgreSQL and apply migrations, then run the server
//! cargo run -p boutique-admin
//!
//! # Run the integration suite against it
//! ADMIN_BASE_URL=http://localhost:3001 \
//! ADMIN_TEST_EMAIL=... ADMIN_TEST_PASSWORD=... \
//!     cargo test -p boutique-integration-tests -- --ignored
//! ```
//!
//! Unit tests for the pure logic (pagination math, filter normalization,
//! status parsing, wire shapes) live in `#[cfg(test)]` modules next to the
//! code they cover.
