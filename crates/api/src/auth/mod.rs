//! Authentication plumbing.
//!
//! Token issuance belongs to the external identity provider; this module
//! only validates bearer tokens and exposes a generator used by tests and
//! local tooling.

pub mod jwt;
