pub mod directory;
pub mod sync;

pub use directory::{family, household, person, TestDirectory};
pub use sync::TestSync;
