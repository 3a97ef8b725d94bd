//! Port definitions — traits adapters implement.

pub mod host;

pub use host::HostClient;
