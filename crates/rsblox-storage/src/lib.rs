//! rsblox-storage: Bind persistence abstraction
//!
//! This crate provides the persistence seam for bind configuration:
//! - `BindStore` trait for loading, saving, and deleting binds per scope
//! - In-memory implementation for testing and embedding
//!
//! Document-store backends live outside this core; their schema is owned by
//! the hosting application. Binds serialize through serde, so any
//! JSON-capable store can implement the trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rsblox-storage                 │
//! ├─────────────────────────────────────────────┤
//! │  traits.rs   - BindStore trait definition   │
//! │  memory.rs   - In-memory implementation     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use memory::MemoryBindStore;
pub use traits::BindStore;
