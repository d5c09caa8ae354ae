//! Command handlers for the `klass` CLI.

mod bench;
mod demo;

pub use bench::{declare_batch, parse_bench_options, run_bench, BenchOptions, BenchRow};
pub use demo::run_demo;
