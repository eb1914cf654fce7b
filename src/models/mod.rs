pub mod dimension;
pub mod fact;

pub use dimension::*;
pub use fact::*;
