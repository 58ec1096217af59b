#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)] // too noisy
#![allow(clippy::missing_errors_doc)]

pub mod engine;
pub mod filter;

mod env;
pub use env::Error as EnvError;
