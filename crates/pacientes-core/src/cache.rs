//! Versioned offline cache for the application's static assets.
//!
//! Independent of the record store: it only shields a fixed manifest of
//! static assets from an unavailable origin, never patient data.
//!
//! Lifecycle:
//! - `install` pre-fetches the whole manifest into a version-named cache
//!   directory; any failed fetch fails the install.
//! - `fetch` serves cached bytes when present, else falls through to the
//!   origin (a miss does not populate the cache).
//! - `activate` deletes every sibling cache whose version name differs from
//!   the current one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

/// Current cache version name.
pub const CACHE_NAME: &str = "controle-pacientes-v1";

/// Static asset paths pre-cached at install time.
pub const STATIC_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/css/style.css",
    "/js/app.js",
    "/manifest.json",
    "/icons/icon-192x192.png",
    "/icons/icon-512x512.png",
];

/// Cache errors.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("asset not available from cache or origin: {0}")]
    AssetUnavailable(String),

    #[error("cache I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Source of truth for asset bytes (the "network" side of the cache).
pub trait AssetSource {
    fn fetch(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Asset source reading from an origin directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, path: &str) -> io::Result<Vec<u8>> {
        let relative = path.trim_start_matches('/');
        let target = if relative.is_empty() {
            self.root.join("index.html")
        } else {
            self.root.join(relative)
        };
        fs::read(target)
    }
}

/// A versioned asset cache rooted at a directory.
///
/// Each cache version is a subdirectory of the root; entries are stored
/// under the hex SHA-256 of their asset path.
pub struct AssetCache {
    root: PathBuf,
    version: String,
    manifest: Vec<String>,
}

impl AssetCache {
    /// Cache with the default version name and asset manifest.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_manifest(
            root,
            CACHE_NAME,
            STATIC_ASSETS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn with_manifest<P: AsRef<Path>>(root: P, version: &str, manifest: Vec<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            version: version.to_string(),
            manifest,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn manifest(&self) -> &[String] {
        &self.manifest
    }

    fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.version)
    }

    fn entry_path(&self, asset: &str) -> PathBuf {
        let digest = Sha256::digest(asset.as_bytes());
        self.cache_dir().join(hex::encode(digest))
    }

    /// Pre-fetch every manifest asset into the cache. All-or-nothing: a
    /// failed fetch aborts the install with the cache left incomplete but
    /// unused until a later successful install.
    pub fn install(&self, source: &dyn AssetSource) -> CacheResult<()> {
        fs::create_dir_all(self.cache_dir())?;

        for asset in &self.manifest {
            let bytes = source
                .fetch(asset)
                .map_err(|_| CacheError::AssetUnavailable(asset.clone()))?;
            fs::write(self.entry_path(asset), bytes)?;
            debug!(asset = %asset, "asset cached");
        }

        info!(cache = %self.version, assets = self.manifest.len(), "cache installed");
        Ok(())
    }

    /// Whether an asset is present in the current cache version.
    pub fn is_cached(&self, asset: &str) -> bool {
        self.entry_path(asset).is_file()
    }

    /// Serve an asset: cache hit wins, otherwise fall through to the source.
    pub fn fetch(&self, asset: &str, source: &dyn AssetSource) -> CacheResult<Vec<u8>> {
        match fs::read(self.entry_path(asset)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => source
                .fetch(asset)
                .map_err(|_| CacheError::AssetUnavailable(asset.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every stale cache version, returning the removed names.
    pub fn activate(&self) -> CacheResult<Vec<String>> {
        let mut removed = Vec::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(removed),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name != self.version {
                fs::remove_dir_all(entry.path())?;
                info!(cache = %name, "stale cache removed");
                removed.push(name);
            }
        }

        Ok(removed)
    }
}
