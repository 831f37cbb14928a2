//! The selected-course set.
//!
//! - Persistence in [`store`] (`.gradcheck/selection.yml`)
//! - Code list import and export in [`transfer`]

pub mod store;
pub mod transfer;

pub use store::SelectionStore;
pub use transfer::{export_codes, import_codes, parse_code_list, CodeImport};
