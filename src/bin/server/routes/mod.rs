pub mod charts;
pub mod songs;
