pub mod run;
pub mod search;
