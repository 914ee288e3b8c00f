pub mod config;
pub mod encode;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod util;
