use std::io::{self, BufRead};

use anyhow::{Context, Result};

use tracer::config::TracerConfig;
use tracer::logging;
use tracer::{Severity, SharedTracer};

fn main() -> Result<()> {
    logging::init_logging(None)?;

    let config = TracerConfig::load()?;
    let tracer = SharedTracer::new(config.threshold);
    tracing::info!("Tracing stdin at threshold {}", config.threshold);

    let skipped = trace_lines(io::stdin().lock(), &tracer)?;
    if skipped > 0 {
        tracing::warn!("Skipped {} malformed lines", skipped);
    }

    println!("{}", tracer.render());
    Ok(())
}

/// Trace every `<severity> <message>` line from `input`
///
/// Lines with an unknown or sentinel severity are reported and skipped.
/// Returns the number of skipped lines.
fn trace_lines<R: BufRead>(input: R, tracer: &SharedTracer) -> Result<usize> {
    let mut skipped = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (name, message) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        let traced = name
            .parse::<Severity>()
            .map_err(|e| e.to_string())
            .and_then(|severity| {
                tracer
                    .try_trace(severity, format_args!("{}", message.trim_start()))
                    .map_err(|e| e.to_string())
            });

        if let Err(reason) = traced {
            tracing::warn!("Skipping line {}: {}", index + 1, reason);
            skipped += 1;
        }
    }

    Ok(skipped)
}
