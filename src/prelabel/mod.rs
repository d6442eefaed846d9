pub mod export;
pub mod language;
pub mod merge;

pub use export::*;
pub use language::*;
pub use merge::*;
