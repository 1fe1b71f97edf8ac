//! Page write cache for incremental builds.
//!
//! The generate stage renders every page on every run, but most runs change
//! only a handful of them. This module lets it skip rewriting files whose
//! contents are byte-for-byte what the previous build wrote, so file
//! timestamps stay put and rsync/CDN uploads only see real changes.
//!
//! ## Cache keys
//!
//! Entries map an output path (relative to the output directory) to the
//! SHA-256 of the bytes last written there. A write is skipped when:
//! 1. An entry for the path exists with the same hash
//! 2. The file is still on disk
//!
//! ## Storage
//!
//! The cache manifest is a JSON file at `<output_dir>/.build-cache.json`.
//! Entries for paths not written during a run are dropped when it is saved.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to the `build` or `generate` command. This starts from
//! an empty manifest, so every file is rewritten.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".build-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk map of output paths to content hashes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: BTreeMap<String, String>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(output_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            _ => Self::empty(),
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// Whether `rel_path` already holds content with `hash`.
    pub fn is_fresh(&self, rel_path: &str, hash: &str, output_dir: &Path) -> bool {
        self.entries.get(rel_path).is_some_and(|h| h == hash)
            && output_dir.join(rel_path).exists()
    }

    pub fn insert(&mut self, rel_path: String, hash: String) {
        self.entries.insert(rel_path, hash);
    }
}

/// SHA-256 of a byte slice, returned as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub unchanged: u32,
    pub written: u32,
}

impl CacheStats {
    pub fn total(&self) -> u32 {
        self.unchanged + self.written
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} unchanged, {} written ({} total)",
                self.unchanged,
                self.written,
                self.total()
            )
        } else {
            write!(f, "{} written", self.written)
        }
    }
}

/// Resolve the cache manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}

/// Writes files under an output directory, skipping unchanged ones.
pub struct CachedWriter {
    output_dir: PathBuf,
    manifest: CacheManifest,
    touched: HashSet<String>,
    stats: CacheStats,
}

impl CachedWriter {
    pub fn new(output_dir: &Path, use_cache: bool) -> Self {
        let manifest = if use_cache {
            CacheManifest::load(output_dir)
        } else {
            CacheManifest::empty()
        };
        Self {
            output_dir: output_dir.to_path_buf(),
            manifest,
            touched: HashSet::new(),
            stats: CacheStats::default(),
        }
    }

    /// Write `contents` to `rel_path` unless the last build left the same
    /// bytes there. Parent directories are created as needed.
    pub fn write(&mut self, rel_path: &str, contents: &[u8]) -> io::Result<()> {
        let hash = hash_bytes(contents);
        self.touched.insert(rel_path.to_string());
        if self.manifest.is_fresh(rel_path, &hash, &self.output_dir) {
            self.stats.unchanged += 1;
            return Ok(());
        }
        let path = self.output_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        self.manifest.insert(rel_path.to_string(), hash);
        self.stats.written += 1;
        Ok(())
    }

    /// Whether `rel_path` has already been written (or found fresh) this run.
    pub fn has_written(&self, rel_path: &str) -> bool {
        self.touched.contains(rel_path)
    }

    /// Drop entries not written this run and save the manifest.
    pub fn finish(mut self) -> io::Result<CacheStats> {
        let touched = &self.touched;
        self.manifest.entries.retain(|path, _| touched.contains(path));
        self.manifest.save(&self.output_dir)?;
        Ok(self.stats)
    }
}
