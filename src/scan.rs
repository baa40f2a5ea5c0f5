use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::decode::decode_class;
use crate::ingest::{IngestSession, Ingested};

/// Snapshot of ingested classes and class-file counts for a scan.
pub(crate) struct ScanOutput {
    pub(crate) ingested: Ingested,
    pub(crate) class_count: usize,
    /// Class files that could not be decoded and were left out of the metrics.
    pub(crate) skipped_count: usize,
}

#[derive(Default)]
struct ScanCounts {
    decoded: usize,
    skipped: usize,
}

/// Decode every class file under `input` into a single ingestion session.
pub(crate) fn scan_input(input: &Path) -> Result<ScanOutput> {
    let mut session = IngestSession::new();
    let mut counts = ScanCounts::default();

    scan_path(input, true, &mut session, &mut counts)?;

    let ingested = session.finish();
    info!(
        input = %input.display(),
        class_files = counts.decoded,
        skipped_files = counts.skipped,
        class_records = ingested.store.len(),
        "scan finished"
    );
    Ok(ScanOutput {
        ingested,
        class_count: counts.decoded,
        skipped_count: counts.skipped,
    })
}

fn scan_path(
    path: &Path,
    strict: bool,
    session: &mut IngestSession,
    counts: &mut ScanCounts,
) -> Result<()> {
    if path.is_dir() {
        scan_dir(path, session, counts)?;
        return Ok(());
    }

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    match extension {
        "class" => scan_class_file(path, session, counts),
        "jar" => scan_jar_file(path, session, counts),
        _ => {
            if strict {
                anyhow::bail!("unsupported input file: {}", path.display())
            } else {
                debug!(path = %path.display(), "skipping non-class file");
                Ok(())
            }
        }
    }
}

fn scan_dir(path: &Path, session: &mut IngestSession, counts: &mut ScanCounts) -> Result<()> {
    let dir =
        fs::read_dir(path).with_context(|| format!("failed to read directory {}", path.display()))?;
    let mut entries = Vec::new();
    for entry in dir {
        let entry =
            entry.with_context(|| format!("failed to read entry under {}", path.display()))?;
        entries.push(entry.path());
    }

    // Sorted traversal keeps the event stream, and so the report, reproducible.
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            scan_dir(&entry, session, counts)?;
        } else {
            scan_path(&entry, false, session, counts)?;
        }
    }

    Ok(())
}

fn scan_class_file(
    path: &Path,
    session: &mut IngestSession,
    counts: &mut ScanCounts,
) -> Result<()> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    match decode_class(&data) {
        Ok(events) => {
            debug!(path = %path.display(), events = events.len(), "decoded class file");
            session.accept_all(events);
            counts.decoded += 1;
        }
        Err(error) => {
            warn!(path = %path.display(), error = %format!("{error:#}"), "skipping class file");
            counts.skipped += 1;
        }
    }
    Ok(())
}

fn scan_jar_file(path: &Path, session: &mut IngestSession, counts: &mut ScanCounts) -> Result<()> {
    let file = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut archive =
        ZipArchive::new(file).with_context(|| format!("failed to read {}", path.display()))?;

    let mut entry_names = Vec::new();
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if name.ends_with(".class") && !name.ends_with("module-info.class") {
            entry_names.push(name);
        }
    }

    entry_names.sort();

    for name in entry_names {
        let mut entry = archive
            .by_name(&name)
            .with_context(|| format!("failed to read {}:{}", path.display(), name))?;
        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .with_context(|| format!("failed to read {}:{}", path.display(), name))?;
        match decode_class(&data) {
            Ok(events) => {
                debug!(entry = %name, events = events.len(), "decoded jar entry");
                session.accept_all(events);
                counts.decoded += 1;
            }
            Err(error) => {
                warn!(
                    jar = %path.display(),
                    entry = %name,
                    error = %format!("{error:#}"),
                    "skipping jar entry"
                );
                counts.skipped += 1;
            }
        }
    }

    Ok(())
}
