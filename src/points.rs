//! Candidate point lists and the provider boundary
//!
//! The renderer core consumes a [`PointSet`] produced by a collaborator; it
//! never mutates points and is never invoked when the provider fails. The
//! live ephemeris/uncertainty service itself is outside this crate; the CLI
//! uses the file-backed provider below.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One candidate sky position: angular offsets from the reference center,
/// tagged with a display color. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyPoint {
    pub ra_offset_arcsec: i32,
    pub de_offset_arcsec: i32,
    pub color_tag: String,
}

/// Provider output: the reference center plus candidate offsets around it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointSet {
    /// Reference right ascension, seconds.
    pub center_ra_sec: i32,
    /// Reference declination, arcseconds.
    pub center_de_sec: i32,
    pub offsets: Vec<SkyPoint>,
}

/// Query parameters handed to a point-list provider.
#[derive(Debug, Clone)]
pub struct PointQuery {
    pub object_id: String,
    /// Observation epoch as a Julian date.
    pub julian_date: f64,
    /// Observer site code.
    pub observatory_code: String,
}

/// Failure of the upstream point-list query. Surfaced verbatim to the user
/// by the caller; the renderer is never constructed on a failed response.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read point list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed point list {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::de::SpannedError,
    },
}

/// A source of candidate point lists.
pub trait PointProvider {
    fn load(&self, query: &PointQuery) -> Result<PointSet, ProviderError>;
}

/// Loads `{object_id}.ron` point sets from a directory.
pub struct FilePointProvider {
    dir: PathBuf,
}

impl FilePointProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl PointProvider for FilePointProvider {
    fn load(&self, query: &PointQuery) -> Result<PointSet, ProviderError> {
        let path = self.dir.join(format!("{}.ron", query.object_id));
        info!(
            "loading points for {} (jd {:.5}, site {}) from {}",
            query.object_id,
            query.julian_date,
            query.observatory_code,
            path.display()
        );
        let text = std::fs::read_to_string(&path).map_err(|source| ProviderError::Io {
            path: path.clone(),
            source,
        })?;
        let set = PointSet::from_str(&text).map_err(|source| ProviderError::Parse {
            path: path.clone(),
            source,
        })?;
        info!("{} candidate points loaded", set.offsets.len());
        Ok(set)
    }
}

impl FromStr for PointSet {
    type Err = ron::de::SpannedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::from_str(s)
    }
}
