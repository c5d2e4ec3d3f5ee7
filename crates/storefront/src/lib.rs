//! Merchstand storefront library.
//!
//! Domain logic for the storefront: the product catalog, the cart,
//! customer accounts and profiles, the order ledger, the per-customer
//! message inbox, and the checkout flow that ties them together.
//!
//! All state lives in a pluggable key-value [`storage::KeyValueStore`];
//! the [`shop::Shop`] composition root wires a store, an event bus, and
//! the catalog together and hands out services.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod repo;
pub mod services;
pub mod shop;
pub mod storage;
