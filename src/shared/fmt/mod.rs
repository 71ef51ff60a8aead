//! Display formatting for table cells and stat cards.

pub mod decimal;
pub mod num;
