// Season analytics: frequencies, evolution, themes, and bigrams.

pub mod bigrams;
pub mod evolution;
pub mod frequency;
pub mod themes;
pub mod thesaurus;
