//! `klass bench`: declaration throughput.
//!
//! Each repetition declares a batch of same-shaped types, the way a module
//! full of small record types is loaded. Three cache strategies are timed:
//! the process-wide cache, one fresh cache per batch, and one fresh cache
//! per type (no sharing at all).

use std::sync::Arc;
use std::time::{Duration, Instant};

use klass_eval::{
    ConfigError, RecordDecl, RecordFactory, RecordType, ShapeCache, SignatureCache,
};
use tracing::debug;

/// Options for `klass bench`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchOptions {
    /// Types declared per repetition.
    pub types: usize,
    /// Fields per type.
    pub fields: usize,
    pub reps: usize,
}

impl Default for BenchOptions {
    fn default() -> Self {
        BenchOptions {
            types: 100,
            fields: 5,
            reps: 100,
        }
    }
}

/// Parse `--types=N`, `--fields=N` and `--reps=N`.
pub fn parse_bench_options(args: &[String]) -> Result<BenchOptions, String> {
    let mut options = BenchOptions::default();

    for arg in args {
        let (slot, value) = if let Some(v) = arg.strip_prefix("--types=") {
            (&mut options.types, v)
        } else if let Some(v) = arg.strip_prefix("--fields=") {
            (&mut options.fields, v)
        } else if let Some(v) = arg.strip_prefix("--reps=") {
            (&mut options.reps, v)
        } else {
            return Err(format!("unknown option '{arg}'"));
        };
        *slot = value
            .parse()
            .map_err(|_| format!("expected a number in '{arg}'"))?;
    }

    Ok(options)
}

/// Declare `types` record types named `C0..` with fields `f0..`.
pub fn declare_batch(
    factory: &RecordFactory,
    types: usize,
    fields: usize,
) -> Result<Vec<Arc<RecordType>>, ConfigError> {
    (0..types)
        .map(|n| {
            let decl = (0..fields).fold(RecordDecl::new(format!("C{n}")), |decl, i| {
                decl.field(format!("f{i}"))
            });
            factory.declare(decl)
        })
        .collect()
}

/// One line of the benchmark report.
#[derive(Clone, Debug)]
pub struct BenchRow {
    pub label: &'static str,
    pub elapsed: Duration,
    /// Bodies compiled over all repetitions.
    pub compilations: usize,
}

/// Run every strategy and print a report.
pub fn run_bench(options: &BenchOptions) -> Result<Vec<BenchRow>, ConfigError> {
    debug!(?options, "starting declaration benchmark");

    let rows = vec![
        time_shared(options)?,
        time_per_batch(options)?,
        time_per_type(options)?,
    ];

    println!(
        "{} types x {} fields, {} reps",
        options.types, options.fields, options.reps
    );
    for row in &rows {
        println!(
            "{:26}  {:>8.3}s  {:>8} compilations",
            row.label,
            row.elapsed.as_secs_f64(),
            row.compilations
        );
    }
    Ok(rows)
}

fn time_shared(options: &BenchOptions) -> Result<BenchRow, ConfigError> {
    let cache = Arc::new(ShapeCache::new());
    let factory = RecordFactory::with_cache(Arc::clone(&cache) as Arc<dyn SignatureCache>);

    let start = Instant::now();
    for _ in 0..options.reps {
        declare_batch(&factory, options.types, options.fields)?;
    }
    Ok(BenchRow {
        label: "shared cache",
        elapsed: start.elapsed(),
        compilations: cache.compilations(),
    })
}

fn time_per_batch(options: &BenchOptions) -> Result<BenchRow, ConfigError> {
    let mut compilations = 0;
    let start = Instant::now();
    for _ in 0..options.reps {
        let cache = Arc::new(ShapeCache::new());
        let factory = RecordFactory::with_cache(Arc::clone(&cache) as Arc<dyn SignatureCache>);
        declare_batch(&factory, options.types, options.fields)?;
        compilations += cache.compilations();
    }
    Ok(BenchRow {
        label: "fresh cache per batch",
        elapsed: start.elapsed(),
        compilations,
    })
}

fn time_per_type(options: &BenchOptions) -> Result<BenchRow, ConfigError> {
    let mut compilations = 0;
    let start = Instant::now();
    for _ in 0..options.reps {
        for _ in 0..options.types {
            let cache = Arc::new(ShapeCache::new());
            let factory =
                RecordFactory::with_cache(Arc::clone(&cache) as Arc<dyn SignatureCache>);
            declare_batch(&factory, 1, options.fields)?;
            compilations += cache.compilations();
        }
    }
    Ok(BenchRow {
        label: "fresh cache per type",
        elapsed: start.elapsed(),
        compilations,
    })
}
