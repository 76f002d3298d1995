//! Image naming and parsing of the registry's tabular listing.
//!
//! Images managed here follow a fixed naming scheme:
//!
//! ```text
//! ubuntu-core/custom/ubuntu-<release>-snappy-core-<arch>-<channel>-<version>-disk1.img
//! ```
//!
//! The listing printed by `openstack image list` is a pipe-delimited table
//! whose first two columns are the image UUID and its name. Everything else
//! in the output (borders, headers, unrelated images) is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default release when neither flags nor configuration name one.
pub const DEFAULT_RELEASE: &str = "rolling";
/// Default channel when neither flags nor configuration name one.
pub const DEFAULT_CHANNEL: &str = "edge";
/// Default architecture when neither flags nor configuration name one.
pub const DEFAULT_ARCH: &str = "amd64";

const IMAGE_PREFIX: &str = "ubuntu-core/custom/ubuntu";
const IMAGE_SUFFIX: &str = "disk1.img";

/// Selects one image family by release, channel and architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageFilter {
    /// Release, e.g. `rolling` or `1504`
    pub release: String,
    /// Channel, e.g. `edge` or `stable`
    pub channel: String,
    /// Architecture, e.g. `amd64`
    pub arch: String,
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE, DEFAULT_CHANNEL, DEFAULT_ARCH)
    }
}

impl fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.release, self.channel, self.arch)
    }
}

impl ImageFilter {
    /// Create a filter from its three components.
    pub fn new(
        release: impl Into<String>,
        channel: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            release: release.into(),
            channel: channel.into(),
            arch: arch.into(),
        }
    }

    /// The common part of every image name in this family, up to (but
    /// excluding) the `-<version>` segment.
    fn name_prefix(&self) -> String {
        // Note the arch comes before the channel in image names
        format!(
            "{IMAGE_PREFIX}-{}-snappy-core-{}-{}",
            self.release, self.arch, self.channel
        )
    }

    /// Format the name of the image holding `version` of this family.
    pub fn image_id(&self, version: u64) -> String {
        format!("{}-{version}-{IMAGE_SUFFIX}", self.name_prefix())
    }

    /// If `name` belongs to this family, return its raw version segment.
    ///
    /// The segment may not contain a `-`; such names belong to a different
    /// family whose channel happens to share our channel as a prefix.
    fn version_segment<'a>(&self, name: &'a str) -> Option<&'a str> {
        let segment = name
            .strip_prefix(self.name_prefix().as_str())?
            .strip_prefix('-')?
            .strip_suffix(IMAGE_SUFFIX)?
            .strip_suffix('-')?;
        (!segment.is_empty() && !segment.contains('-')).then_some(segment)
    }
}

/// An image of a given family together with its parsed version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVersion {
    /// Image name as listed by the registry
    pub name: String,
    /// Build number parsed from the name
    pub version: u64,
}

/// Extract the name column from one row of the listing table.
fn row_name(line: &str) -> Option<&str> {
    let line = line.trim();
    if !line.starts_with('|') {
        return None;
    }
    // "| <id> | <name> | ..." splits into "", id, name, ...
    line.split('|').nth(2).map(str::trim)
}

/// Collect all images of `filter`'s family from the registry listing, in
/// table order.
///
/// A matching image whose version segment is not a non-negative integer
/// fails the whole parse with [`Error::InvalidVersion`].
pub fn parse_image_list(output: &str, filter: &ImageFilter) -> Result<Vec<ImageVersion>> {
    let mut images = Vec::new();
    for name in output.lines().filter_map(row_name) {
        let Some(segment) = filter.version_segment(name) else {
            continue;
        };
        let version = segment
            .parse::<u64>()
            .map_err(|source| Error::InvalidVersion {
                image: name.to_string(),
                version: segment.to_string(),
                source,
            })?;
        tracing::trace!("Found {name} (version {version})");
        images.push(ImageVersion {
            name: name.to_string(),
            version,
        });
    }
    Ok(images)
}
