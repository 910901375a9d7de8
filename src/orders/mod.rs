//! Order domain
//!
//! The order lifecycle lives here, split into three pieces:
//! - [`pricing`]: resolves line items against the current menu and
//!   computes totals in decimal arithmetic
//! - [`access`]: owner-or-admin guard shared by every order read/write
//! - [`service`]: the mutation service tying repositories, pricing and
//!   access together, including the versioned retry loop for item edits

pub mod access;
pub mod pricing;
pub mod service;

pub use access::ensure_can_access;
pub use pricing::PricingResolver;
pub use service::OrderService;
