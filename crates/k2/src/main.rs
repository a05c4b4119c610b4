//! K2 interpreter command-line front end

mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use k2cache::ExprCache;
use k2lang::{Outcome, Printed, Session};
use tracing::{debug, warn};

/// Timing line reported for results served from the cache. A constant:
/// no clock is read on a cache hit.
const CACHED_TIMING: &str = "Execution time: 0 nanoseconds (cached)";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Evaluate a single expression and exit
    #[arg(short = 'e', value_name = "EXPR")]
    expr: Option<String>,

    /// Script file to execute, one statement per line
    file: Option<PathBuf>,

    /// Disable the expression result cache for this run
    #[arg(long)]
    no_cache: bool,

    /// Empty the cache directory before running
    #[arg(long)]
    clear_cache: bool,

    /// Cache directory (defaults to a shared per-machine directory)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.expr.is_none() && args.file.is_none() {
        println!("K2 Language Interpreter");
        println!("Usage: k2 <filename> or k2 -e \"expression\"");
        std::process::exit(1);
    }

    run(args)
}

fn run(args: Args) -> Result<()> {
    let mut session = Session::new();
    if args.no_cache {
        session.set_cache_enabled(false);
    }

    // File execution is never cached; only open the directory when the
    // expression mode or --clear-cache needs it.
    let cache = if args.expr.is_some() || args.clear_cache {
        open_cache(&args, &session)
    } else {
        None
    };

    if args.clear_cache {
        if let Some(cache) = &cache {
            if let Err(err) = cache.clear() {
                warn!("failed to clear cache: {err}");
            }
        }
    }

    if let Some(expr) = args.expr.as_deref() {
        run_expression(&mut session, cache.as_ref(), expr);
    } else if let Some(path) = args.file.as_deref() {
        script::run_file(&mut session, path)?;
    }

    if let Some(cache) = &cache {
        let stats = cache.stats();
        debug!(
            hits = stats.hits(),
            misses = stats.misses(),
            stores = stats.stores(),
            "cache counters"
        );
    }

    Ok(())
}

/// Open the cache directory, degrading to an uncached run if it cannot
/// be created.
fn open_cache(args: &Args, session: &Session) -> Option<ExprCache> {
    let dir = args.cache_dir.clone().unwrap_or_else(ExprCache::default_dir);
    match ExprCache::open(&dir) {
        Ok(mut cache) => {
            cache.set_enabled(session.cache_enabled());
            Some(cache)
        }
        Err(err) => {
            warn!(
                "cache directory {} unavailable, caching disabled: {err}",
                dir.display()
            );
            None
        }
    }
}

/// Evaluate one expression from the command line, consulting the result
/// cache before dispatching.
///
/// A hit replays the stored integer without touching the session; the
/// dispatcher never runs, so no variable is bound and no clock is read.
fn run_expression(session: &mut Session, cache: Option<&ExprCache>, expr: &str) {
    if let Some(cache) = cache {
        if let Some(value) = cache.lookup(expr) {
            debug!(key = %k2cache::cache_key(expr), "cache hit");
            println!("{value}");
            if session.show_exec_time() {
                println!("{CACHED_TIMING}");
            }
            return;
        }
    }

    match session.execute(expr) {
        Ok(outcome) => {
            report(&outcome);
            // Only statements that print their result are replayable.
            if let (Some(cache), Printed::Value(value)) = (cache, outcome.printed) {
                if let Err(err) = cache.store(expr, value) {
                    warn!("failed to write cache entry: {err}");
                }
            }
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}

/// Write a statement's outcome to standard output.
pub(crate) fn report(outcome: &Outcome) {
    match outcome.printed {
        Printed::Nothing => {}
        Printed::Value(value) => println!("{value}"),
        Printed::Toggle(true) => println!("Execution time display enabled"),
        Printed::Toggle(false) => println!("Execution time display disabled"),
    }

    if let Some(nanos) = outcome.elapsed_nanos {
        println!("Execution time: {nanos} nanoseconds");
    }
}
