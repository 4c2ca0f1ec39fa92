#![allow(async_fn_in_trait)]
#![allow(clippy::needless_range_loop)]

pub mod arcaea;
pub mod commands;
pub mod context;
pub mod logs;
pub mod time;
