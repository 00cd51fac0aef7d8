pub mod client;

pub use client::{Metrics, WorkerClient, WorkerError};
