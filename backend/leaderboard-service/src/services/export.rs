//! Plain-text export of the top players.
//!
//! Every call re-renders the file and overwrites the single export slot on
//! disk, whether or not the ranking changed. Exports through one writer run
//! one at a time, so the file on disk is always the most recent render.

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::report::ranked;
use super::snapshot::write_atomic;
use super::store::SharedRankedStore;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::models::RankedEntry;

pub const EXPORT_HEADER: &str = "=== TOP PLAYERS ===";
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Rendered export, already written to `path`.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub download_name: String,
    pub body: String,
}

#[derive(Clone)]
pub struct ExportWriter {
    store: SharedRankedStore,
    path: PathBuf,
    download_name: String,
    write_lock: Arc<Mutex<()>>,
}

impl ExportWriter {
    pub fn new(
        store: SharedRankedStore,
        path: impl Into<PathBuf>,
        download_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            path: path.into(),
            download_name: download_name.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(store: SharedRankedStore, config: &ExportConfig) -> Self {
        Self::new(store, config.path.clone(), config.download_name.clone())
    }

    pub async fn export_top(&self, n: usize) -> Result<ExportArtifact> {
        self.export_top_at(n, Local::now()).await
    }

    pub async fn export_top_at(&self, n: usize, now: DateTime<Local>) -> Result<ExportArtifact> {
        let _guard = self.write_lock.lock().await;

        let entries = self.store.top_k(n).await?;
        let line_count = entries.len();
        let body = render_export(entries, now);

        write_atomic(&self.path, body.as_bytes()).await?;
        debug!(path = %self.path.display(), players = line_count, "Leaderboard export written");

        Ok(ExportArtifact {
            path: self.path.clone(),
            download_name: self.download_name.clone(),
            body,
        })
    }
}

pub fn render_export(entries: Vec<RankedEntry>, now: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    // Writing into a String cannot fail
    let _ = writeln!(out, "Generated: {}", now.format(EXPORT_TIMESTAMP_FORMAT));
    out.push('\n');
    for (rank, entry) in ranked(entries) {
        let _ = writeln!(
            out,
            "{}. {} - {} points",
            rank,
            entry.member,
            format_points(entry.score)
        );
    }
    out
}

/// Float display matching the original service's output.
///
/// Integral scores keep a trailing `.0` (`25.0`, not `25`). Values with a
/// decimal exponent below -4 or at least 16 switch to exponent form with a
/// signed two-digit exponent (`1e+16`, `1.5e-05`).
pub fn format_points(score: f64) -> String {
    if !score.is_finite() {
        return format!("{score}");
    }

    let sci = format!("{score:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if score != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}
