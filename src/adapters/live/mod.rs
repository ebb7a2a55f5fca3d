//! Live adapters that talk to real external services.

pub mod gemini;
