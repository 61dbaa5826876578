//! Patra Core Library
//!
//! Transport-neutral protocol core for the Patra journal peripheral.
//!
//! This crate provides:
//! - Bounds-checked record tables for journal and parameter pages
//! - The command dispatcher / paged transmitter state machine
//! - The [`Notifier`] trait that transport bindings implement
//!
//! # Transport bindings
//! - ESP32 (esp32-nimble): see `patra-esp32`
//!
//! # Note
//! The core is purely reactive: it runs to completion inside the transport's
//! write callback and never blocks or polls. The transport guarantees that
//! write callbacks are not re-entered concurrently, so no locking lives here.

pub mod journal;
pub mod service;

pub use journal::*;
pub use service::*;
