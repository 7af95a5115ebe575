//! Small helpers shared across layers.

pub mod identifier;
pub mod memory;

pub use identifier::normalize_identifier;
pub use memory::MemorySnapshot;
