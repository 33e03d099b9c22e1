pub mod error;
pub mod sheet;

pub use error::{ImporterError, Result};
pub use sheet::{
    SheetOutcome, ValidationReport, find_sheets, import_file, process_file, validate_file,
};
