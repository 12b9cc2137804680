pub mod client;
pub mod gemini;

pub use gemini::GeminiClient;
