//! Content-addressed expression result cache
//!
//! Storage layout: one plain file per cached expression inside a shared
//! directory. The filename is the hex-encoded SHA-256 of the expression's
//! exact source text; the contents are the decimal integer result.
//!
//! The directory is shared between processes. Entries are idempotent (the
//! same text always produces the same result), so concurrent writers for a
//! key are last-writer-wins, and `store` renames a temp file into place so
//! readers never observe a partial entry. A `clear` racing a `store` can
//! still leave one fresh entry behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::stats::CacheStats;

/// Handle to a shared expression cache directory
pub struct ExprCache {
    dir: PathBuf,
    enabled: bool,
    stats: CacheStats,
}

impl ExprCache {
    /// Open the cache rooted at `dir`, creating the directory if needed
    ///
    /// # Arguments
    /// * `dir` - Shared cache directory
    ///
    /// # Returns
    /// * `Result<ExprCache>` - Cache handle, enabled by default
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        Ok(ExprCache {
            dir,
            enabled: true,
            stats: CacheStats::new(),
        })
    }

    /// The default shared cache directory for this machine
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("k2-cache")
    }

    /// Enable or disable the cache
    ///
    /// A disabled cache never hits and never writes; `clear` still works.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether lookups and stores are live
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up the memoized result for an expression
    ///
    /// Fails closed: a missing, unreadable, or unparseable entry is a
    /// miss, never an error.
    pub fn lookup(&self, expr: &str) -> Option<i64> {
        if !self.enabled {
            return None;
        }

        let value = fs::read_to_string(self.entry_path(expr))
            .ok()
            .and_then(|contents| contents.trim().parse::<i64>().ok());

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }

        value
    }

    /// Memoize `result` for an expression
    ///
    /// The entry is written beside its final path and renamed into place,
    /// so a concurrent `lookup` sees either the old entry or the new one.
    /// No-op while disabled.
    pub fn store(&self, expr: &str, result: i64) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.entry_path(expr);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, result.to_string())?;
        fs::rename(&tmp, &path)?;

        self.stats.record_store();
        Ok(())
    }

    /// Remove every entry file in the cache directory
    ///
    /// Files that vanish mid-removal (a concurrent clear) are ignored.
    pub fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    /// Hit/miss counters for this handle
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn entry_path(&self, expr: &str) -> PathBuf {
        self.dir.join(cache_key(expr))
    }
}

/// Hex-encoded SHA-256 of an expression's exact source text
///
/// This is the entry filename, so two expressions collide only on byte
/// equality of their text.
pub fn cache_key(expr: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(expr.as_bytes());
    hex::encode(hasher.finalize())
}
