//! Pictor OS abstraction (GOS)
//!
//! The graphics stack never talks to a scheduler directly. Everything it
//! needs from the host RTOS goes through the narrow [`Os`] trait:
//!
//! - sleep for a number of scheduler ticks
//! - take a semaphore with a timeout
//! - create a thread
//!
//! [`Gos`] wraps a backend and adds the portable policy on top: duration to
//! tick conversion that never yields a zero-tick wait, and the fatal-halt
//! policy for thread creation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  GDISP / GWIN (rendering, input tasks)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pictor-gos (this crate - Gos<O>)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Host scheduler binding (impl Os)       │
//! └─────────────────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gos;
pub mod os;
pub mod ticks;

pub use embassy_time::Duration;
pub use gos::{Gos, WaitResult};
pub use os::{Fatal, Os, Priority, SpawnError, ThreadEntry, Wait};
pub use ticks::ticks_for;
