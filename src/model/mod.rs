//! In-memory model of a conversion.
//!
//! The reader produces raw worksheets that mirror the SpreadsheetML
//! structure, the normalizer turns their tables into rectangular grids, and
//! the builder promotes those grids into output sheets.

mod table;
mod value;
mod worksheet;

pub use table::*;
pub use value::*;
pub use worksheet::*;
