//! Input parsing, cell values and data source handling.

mod parser;
mod source;
mod value;

pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
pub use value::{Row, Value, parse_number, row};
