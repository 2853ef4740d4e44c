//! netstate: network state and identity resolver
//!
//! A library for answering one-shot questions about the host's network:
//! the class of the active connection, whether an address is reachable,
//! the best-effort hardware (MAC) address, and what a domain resolves to.

pub mod config;
pub mod identity;
pub mod network;
pub mod probe;
pub mod resolver;
