pub mod exchange;
pub mod span;
pub mod token;

pub use exchange::*;
pub use span::*;
pub use token::*;
