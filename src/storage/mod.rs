//! Storage layer: abstraction traits plus the bundled backends.

pub mod json;
pub mod memory;
pub mod traits;

pub use json::JsonConnection;
pub use memory::MemoryConnection;
pub use traits::{
    CategoryStorage, Connection, ExpenseStorage, IncomeStorage, MandatoryRuleStorage,
    SavingsStorage, UserMarkerStorage,
};
