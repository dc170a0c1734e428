//! Question store adapters.

mod memory;

pub use memory::MemoryQuestionStore;
