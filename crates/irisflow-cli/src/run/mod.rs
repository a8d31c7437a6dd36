pub mod input;
pub mod runner;
pub mod util;
