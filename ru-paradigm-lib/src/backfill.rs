// Line-delimited vocabulary backfill: replace each entry's `forms` with a
// freshly synthesized paradigm.
//
// One bad line never stops the run; it is copied through and counted.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::analyzer::Analyzer;
use crate::error::BackfillError;
use crate::paradigm::synthesize;

/// Options for a backfill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillOptions {
    /// Only touch entries with no forms or a single bare form.
    pub only_missing: bool,
    /// Leave `vocab_item.part_of_speech` as it is.
    pub keep_pos: bool,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillStats {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Updated,
    /// Filtered out by `only_missing`.
    Unchanged,
    Skipped(&'static str),
}

/// Whether an entry needs its forms regenerated.
pub fn should_backfill(entry: &Value, only_missing: bool) -> bool {
    if !only_missing {
        return true;
    }
    match entry.get("forms").and_then(Value::as_array) {
        // A single bare form is a placeholder, not a generated paradigm.
        Some(forms) => forms.len() <= 1,
        None => true,
    }
}

/// Regenerate the forms of one parsed entry in place.
pub fn backfill_entry(
    entry: &mut Value,
    analyzer: &dyn Analyzer,
    opts: &BackfillOptions,
) -> EntryOutcome {
    if !entry.is_object() {
        return EntryOutcome::Skipped("not a JSON object");
    }
    if !should_backfill(entry, opts.only_missing) {
        return EntryOutcome::Unchanged;
    }

    let base_form = match entry.get("vocab_item").and_then(Value::as_object) {
        Some(item) => ["base_form", "lookup_form"]
            .iter()
            .filter_map(|k| item.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        None => return EntryOutcome::Skipped("missing vocab_item"),
    };
    let base_form = match base_form {
        Some(b) => b,
        None => return EntryOutcome::Skipped("missing base form"),
    };

    let synthesis = match synthesize(&base_form, Some(analyzer)) {
        Ok(s) => s,
        Err(_) => return EntryOutcome::Skipped("malformed base form"),
    };
    let forms = match serde_json::to_value(&synthesis.forms) {
        Ok(v) => v,
        Err(_) => return EntryOutcome::Skipped("unserializable forms"),
    };

    entry["forms"] = forms;
    if !opts.keep_pos {
        entry["vocab_item"]["part_of_speech"] = Value::String(synthesis.pos.as_str().to_string());
    }
    EntryOutcome::Updated
}

/// Rewrite a JSONL stream, one output line per non-blank input line.
pub fn backfill<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    analyzer: &dyn Analyzer,
    opts: &BackfillOptions,
) -> Result<BackfillStats, BackfillError> {
    let mut stats = BackfillStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let raw = strip_line_end(&buf);

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                warn!(line = line_no, error = %err, "invalid UTF-8, copied through");
                stats.total += 1;
                stats.skipped += 1;
                output.write_all(raw)?;
                output.write_all(b"\n")?;
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.total += 1;

        let mut entry: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(err) => {
                warn!(line = line_no, error = %err, "invalid JSON, copied through");
                writeln!(output, "{line}")?;
                stats.skipped += 1;
                continue;
            }
        };

        match backfill_entry(&mut entry, analyzer, opts) {
            EntryOutcome::Updated => stats.updated += 1,
            EntryOutcome::Unchanged => {}
            EntryOutcome::Skipped(reason) => {
                warn!(line = line_no, reason, "entry skipped");
                stats.skipped += 1;
            }
        }

        serde_json::to_writer(&mut output, &entry)?;
        output.write_all(b"\n")?;
    }

    output.flush()?;
    Ok(stats)
}

/// Backfill `input` into `output`. When both name the same file the result
/// goes to a temporary file in the same directory, which replaces the input
/// only once the whole stream has been written.
pub fn backfill_file(
    input: &Path,
    output: &Path,
    analyzer: &dyn Analyzer,
    opts: &BackfillOptions,
) -> Result<BackfillStats, BackfillError> {
    let reader = BufReader::new(File::open(input)?);
    let dir = output
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let stats = if same_file(input, output) {
        // Dropped, and so deleted, if the run fails.
        let mut tmp = NamedTempFile::new_in(dir)?;
        let stats = backfill(reader, BufWriter::new(tmp.as_file_mut()), analyzer, opts)?;
        tmp.persist(output).map_err(|err| err.error)?;
        stats
    } else {
        fs::create_dir_all(dir)?;
        backfill(reader, BufWriter::new(File::create(output)?), analyzer, opts)?
    };

    info!(
        total = stats.total,
        updated = stats.updated,
        skipped = stats.skipped,
        out = %output.display(),
        "backfill finished"
    );
    Ok(stats)
}

fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(&b"\n"[..]).unwrap_or(line);
    line.strip_suffix(&b"\r"[..]).unwrap_or(line)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
