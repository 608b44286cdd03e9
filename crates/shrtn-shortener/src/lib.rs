//! URL shortener service implementation.
//!
//! This crate wires a [`Repository`](shrtn_core::Repository) and a
//! [`Generator`](shrtn_generator::Generator) together behind the
//! [`Shortener`](shrtn_core::Shortener) trait and owns the URL
//! normalization policy.

pub mod normalize;
pub mod service;

pub use normalize::UrlPolicy;
pub use service::ShortenerService;
