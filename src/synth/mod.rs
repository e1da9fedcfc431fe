pub mod hooks;
pub mod profile;
pub mod prompts;

pub use hooks::synthesize;
pub use profile::extract_with_model;
