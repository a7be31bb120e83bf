pub mod document;
pub mod matching;
