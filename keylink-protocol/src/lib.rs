//! Keylink Matrix Snapshot Protocol
//!
//! This crate defines the UART-based request/response protocol between
//! the host half of a split keyboard and the remote controller that
//! scans the far key matrix and rotary encoders. The protocol is
//! designed for simplicity, low latency, and robustness on a noisy
//! point-to-point link.
//!
//! # Protocol Overview
//!
//! The host sends a single request byte; the peer answers with one
//! fixed-length snapshot frame:
//! ```text
//! ┌──────────────────┬───────────────┬────────────┐
//! │ MATRIX ROWS      │ ENCODERS      │ TERMINATOR │
//! │ 2B per row (×5)  │ 1B per ch(×2) │ 1B (0xE0)  │
//! └──────────────────┴───────────────┴────────────┘
//! ```
//!
//! Matrix bytes carry key state in their low 7 bits, so the terminator
//! sentinel can never appear in a genuine matrix byte. The host trusts
//! the remote keystates entirely — there is no delta encoding, every
//! frame is a full snapshot.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod matrix;

pub use events::{Direction, EncoderChannel, EncoderEvent};
pub use frame::{
    Frame, FRAME_LEN, FRAME_TERMINATOR, LINK_BAUD, MATRIX_COLS, MATRIX_ROWS, NUM_ENCODERS,
    PAYLOAD_LEN, REQUEST_SNAPSHOT,
};
pub use matrix::{MatrixRow, MatrixState};
