pub mod header;
pub mod parser;
pub mod record;
pub mod summary;
