pub mod entry;
pub mod import;
pub mod ranking;
pub mod reference;
pub mod result;
