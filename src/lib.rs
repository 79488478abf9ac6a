pub mod address;
pub mod backing;
pub mod constants;
pub mod dirty;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod tlb;
pub mod translator;

// Re-export commonly used items for convenience
pub use address::VirtualAddress;
pub use backing::{BackingStore, PageSource};
pub use dirty::DirtyClass;
pub use error::{PagerError, Result};
pub use translator::{Outcome, PagerConfig, ParsePolicy, Statistics, Translation, Translator};
