pub mod check;
pub mod parse;
pub mod render;

pub use check::*;
pub use parse::*;
pub use render::*;
