use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::parser::classify;
use crate::record::ProfileRecord;

const CHUNK: usize = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    pub source: String,
    pub extracted_at: DateTime<Utc>,
    pub record: ProfileRecord,
}

pub struct BatchCounts {
    pub total: usize,
    pub named: usize,
    pub blank: usize,
    pub experience: usize,
}

impl BatchCounts {
    pub fn print(&self) {
        println!(
            "Classified {} profiles: {} named, {} blank, {} experience entries.",
            self.total, self.named, self.blank, self.experience,
        );
    }
}

/// Every `*.txt` file directly under `dir`, sorted by path.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Classify `(source, text)` pairs in parallel, keeping input order.
pub fn classify_all(inputs: &[(String, String)]) -> Vec<BatchRow> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut rows = Vec::with_capacity(inputs.len());
    for chunk in inputs.chunks(CHUNK) {
        let classified: Vec<_> = chunk
            .par_iter()
            .map(|(source, text)| BatchRow {
                source: source.clone(),
                extracted_at: Utc::now(),
                record: classify(text),
            })
            .collect();
        rows.extend(classified);
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    rows
}

pub fn count(rows: &[BatchRow]) -> BatchCounts {
    BatchCounts {
        total: rows.len(),
        named: rows.iter().filter(|r| !r.record.name.is_empty()).count(),
        blank: rows.iter().filter(|r| r.record.is_blank()).count(),
        experience: rows.iter().map(|r| r.record.experience.len()).sum(),
    }
}
