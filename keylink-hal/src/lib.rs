//! Keylink Hardware Abstraction Layer
//!
//! This crate defines the transport traits the link driver is written
//! against, so the same driver code runs on any chip with a UART and in
//! host tests with a scripted mock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Driver (keylink-core)                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keylink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ BlockingIo    │       │ test mocks    │
//! │ (embedded-io) │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Polled serial communication
//! - [`io::BlockingIo`] - Adapter binding the traits to any
//!   `embedded-io` peripheral

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key items at crate root for convenience
pub use io::BlockingIo;
pub use uart::{Uart, UartRx, UartTx};
