pub mod command;
pub mod cpu;
pub mod error;
pub mod parse;
pub mod poller;
pub mod process;
pub mod sampler;
pub mod snapshot;
