//! UTM serial command protocol
//!
//! This crate defines the ASCII protocol spoken between the host software and
//! the load-frame controller. The protocol is deliberately simple: one command
//! per line, a case-sensitive verb, and at most one numeric parameter.
//!
//! # Protocol Overview
//!
//! ```text
//! host → rig:  <Verb>[ <integer>]\n        (or \r)
//! rig → host:  <Reply text>\r\n           (query and echo replies)
//!              <force>\n                  (load stream, when enabled)
//!              <pos>\t<rpm>\t<avg rpm>\n  (sensor stream, when enabled)
//! ```
//!
//! Unknown verbs are dropped without a reply.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod help;
pub mod line;
pub mod reply;

pub use command::Command;
pub use line::{CommandLine, COMMAND_BUFFER_SIZE, LINE_CAPACITY};
pub use reply::{Decimal2, Reply, ScanLine, StreamLine};

/// Firmware version reported by `GetVersion`
///
/// Bump on every release that changes observable behavior.
pub const FIRMWARE_VERSION: &str = "1.2.0";
