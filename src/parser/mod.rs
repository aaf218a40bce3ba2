mod aliases;
mod chunker;
mod partition;
mod types;

pub use aliases::{expand_aliases, is_program, PRINT_HELPER};
pub use chunker::{chunks, next_chunk};
pub use partition::{is_declaration, is_import, partition};
pub use types::Partition;
