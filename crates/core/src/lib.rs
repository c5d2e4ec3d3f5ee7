//! Merchstand Core - Shared types library.
//!
//! This crate provides common types used across all Merchstand components:
//! - `storefront` - The store layer (accounts, cart, orders, profiles)
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Normalized emails, entity ids, money rounding, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
