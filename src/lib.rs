// Sublex: lexical analytics for TV subtitle seasons
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline, from subtitle ingestion to season-wide reports.

pub mod analysis;
pub mod config;
pub mod episodes;
pub mod output;
pub mod pipeline;
pub mod subtitles;
pub mod text;
