pub mod shortcuts;
pub mod sink;
