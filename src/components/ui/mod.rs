pub mod button;
pub mod dialog;

pub use button::*;
pub use dialog::*;
