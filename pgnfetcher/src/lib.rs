pub mod batch;
pub mod error;
pub mod mapper;
pub mod models;
pub mod parser;
pub mod visitor;

pub use crate::batch::chunk;
pub use crate::error::{PgnError, Result};
pub use crate::models::Pgn;
pub use crate::parser::{discover_pgn_files, parse_pgn_file};
