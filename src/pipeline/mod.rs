// Pipeline orchestration: per-episode work, season aggregation, results.

pub mod outcome;
pub mod report;
pub mod season;
