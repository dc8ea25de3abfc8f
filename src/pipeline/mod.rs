pub mod detail;
pub mod extraction;
pub mod gemini;
pub mod names;
pub mod normalize;
pub mod processor;
pub mod prompts;
