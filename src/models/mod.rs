pub mod medicine;
pub mod session;

pub use medicine::*;
pub use session::*;
