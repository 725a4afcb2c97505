// Subtitle ingestion: SRT decoding, block parsing, and caption cleanup.

pub mod encoding;
pub mod models;
pub mod parser;
pub mod time;
