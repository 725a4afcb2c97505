// Text normalization: tokenizing, stopword filtering, and lemmatization.

pub mod lemmatize;
pub mod lexicon;
pub mod normalizer;
pub mod stopwords;
pub mod tagger;
pub mod tokenize;
