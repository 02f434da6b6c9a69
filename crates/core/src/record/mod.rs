mod parse;
mod types;

pub use parse::{parse_assignment, parse_record, parse_record_list};
pub use types::{AttributeValue, Key, Record};
