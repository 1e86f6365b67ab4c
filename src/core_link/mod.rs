pub mod bootstrapper;
pub mod checked;
pub mod crt;
pub mod diag;
pub mod error;
pub mod heap;
pub mod utils;
