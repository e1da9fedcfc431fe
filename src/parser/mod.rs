pub mod experience;
pub mod lines;
pub mod profile;
pub mod sections;

pub use profile::classify;
