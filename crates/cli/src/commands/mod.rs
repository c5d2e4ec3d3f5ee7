//! CLI command implementations, one module per command group.

pub mod account;
pub mod address;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod inbox;
pub mod orders;
