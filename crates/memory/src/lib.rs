//! Memory backends for Promptmason.
//!
//! Implementations of the `Memory` trait from `promptmason-core`:
//! - `VolatileMemory` — in-process, thread-safe; the default for tests
//!   and single-process agents
//! - `NoopMemory` — remembers nothing; for prompts with no dynamic state

pub mod noop;
pub mod volatile;

pub use noop::NoopMemory;
pub use volatile::VolatileMemory;
