//! `hasher hash` - hash domain names line by line.

use anyhow::{Context as _, Result};
use hashedrpz_core::{HashError, Hashed, HashedRpz, LengthBudget};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Context;
use crate::cli::args::HashArgs;
use crate::explain::{Explain, LevelTrace};
use crate::output::{Record, RecordKind, RecordWriter};

/// What to do with names whose hash does not fit the length budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooLong {
    /// Fail the run
    #[default]
    Fail,
    /// Keep the labels that fit and wildcard the rest
    Wildcard,
    /// Skip the name
    Ignore,
}

/// Per-run settings of the hash command.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub origin: String,
    pub too_long: TooLong,
    pub add_wildcards: bool,
    pub append_origin: bool,
    pub skip_comments: bool,
    pub explain: bool,
}

/// A line that could not be hashed.
#[derive(Error, Debug)]
#[error("hashing of line {line} ({input:?}) in {input_name} failed: {error}")]
pub struct LineError {
    pub input_name: String,
    pub line: u64,
    pub input: String,
    #[source]
    pub error: HashError,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub lines: u64,
    pub hashed: u64,
    pub wildcarded: u64,
    pub skipped: u64,
}

pub fn execute(ctx: &Context, args: HashArgs) -> Result<()> {
    let key = ctx.require_key(args.key.as_deref())?;
    let origin = ctx.require_origin(args.origin_domain.as_deref())?;

    // Reject a bad origin before reading any input
    let budget = LengthBudget::from_origin(origin)?;

    let too_long = if args.ignore_too_long {
        TooLong::Ignore
    } else if args.make_wildcard || ctx.config.make_wildcard {
        TooLong::Wildcard
    } else {
        TooLong::Fail
    };

    let settings = Settings {
        origin: origin.to_string(),
        too_long,
        add_wildcards: args.add_wildcards,
        append_origin: args.append_origin,
        skip_comments: args.skip_comments,
        explain: args.explain,
    };

    if settings.explain {
        Explain::hash(origin, budget).print();
    }

    let hasher: HashedRpz = HashedRpz::new(key);

    let stdout = io::stdout();
    let mut out = RecordWriter::new(
        ctx.output_format,
        BufWriter::new(stdout.lock()),
        args.echo_ownername,
    );
    let mut stats = Stats::default();

    if args.files.is_empty() {
        let stdin = io::stdin();
        process(&hasher, &settings, "stdin", stdin.lock(), &mut out, &mut stats)?;
    } else {
        for path in &args.files {
            if path == Path::new("-") {
                let stdin = io::stdin();
                process(&hasher, &settings, "stdin", stdin.lock(), &mut out, &mut stats)?;
                continue;
            }

            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let name = path.display().to_string();
            process(&hasher, &settings, &name, BufReader::new(file), &mut out, &mut stats)?;
        }
    }

    out.flush()?;

    info!(
        lines = stats.lines,
        hashed = stats.hashed,
        wildcarded = stats.wildcarded,
        skipped = stats.skipped,
        "done"
    );

    Ok(())
}

/// Hash every line of `reader` into `out`.
///
/// Stops at the first line that cannot be hashed, unless it is merely too
/// long and `settings.too_long` says otherwise.
pub fn process<R: BufRead, W: Write>(
    hasher: &HashedRpz,
    settings: &Settings,
    input_name: &str,
    reader: R,
    out: &mut RecordWriter<W>,
    stats: &mut Stats,
) -> Result<()> {
    let mut lineno = 0u64;

    for line in reader.lines() {
        let line = line.with_context(|| format!("failed to read {input_name}"))?;
        lineno += 1;
        stats.lines += 1;

        let name = line.trim();
        if settings.skip_comments && is_comment(name) {
            continue;
        }

        let hashed = match hash_line(hasher, settings, name) {
            Ok(hashed) => hashed,
            Err(HashError::TooLong { .. }) if settings.too_long == TooLong::Ignore => {
                warn!(input = input_name, line = lineno, name, "skipping name that is too long");
                stats.skipped += 1;
                continue;
            }
            Err(error) => {
                return Err(LineError {
                    input_name: input_name.to_string(),
                    line: lineno,
                    input: name.to_string(),
                    error,
                }
                .into());
            }
        };

        debug!(name, hashed = %hashed.name, wildcard = hashed.wildcard, "hashed");
        stats.hashed += 1;
        if hashed.wildcard {
            stats.wildcarded += 1;
        }

        let primary = qualify(&hashed.name, settings);
        let blanket = (settings.add_wildcards && !hashed.wildcard && !name.starts_with('*'))
            .then(|| qualify(&format!("*.{}", hashed.name), settings));

        let mut records = vec![Record {
            input: name,
            output: &primary,
            kind: if hashed.wildcard {
                RecordKind::Fallback
            } else {
                RecordKind::Exact
            },
        }];
        if let Some(blanket) = &blanket {
            records.push(Record {
                input: name,
                output: blanket,
                kind: RecordKind::Blanket,
            });
        }

        out.write_all(&records)?;
    }

    Ok(())
}

fn hash_line(hasher: &HashedRpz, settings: &Settings, name: &str) -> hashedrpz_core::Result<Hashed> {
    let mut trace = settings.explain.then(|| LevelTrace::start(name));
    let mut level = |suffix: &str, partial: &str| {
        if let Some(trace) = trace.as_mut() {
            trace.level(suffix, partial);
        }
    };

    let hashed = match settings.too_long {
        TooLong::Wildcard => hasher.hash_wildcard(name, &settings.origin, Some(&mut level)),
        TooLong::Fail | TooLong::Ignore => hasher
            .hash(name, &settings.origin, Some(&mut level))
            .map(|name| Hashed {
                name,
                wildcard: false,
            }),
    };

    if let Some(trace) = trace {
        trace.finish();
    }

    hashed
}

fn qualify(name: &str, settings: &Settings) -> String {
    if settings.append_origin {
        format!("{name}.{}", settings.origin)
    } else {
        name.to_string()
    }
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with(';')
}
