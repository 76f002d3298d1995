//! # Command line interface
//!
//! Subcommands map one-to-one onto [`Client`] operations; results go to
//! stdout so they can be consumed by scripts, diagnostics go to stderr.

use std::ffi::OsString;
use std::io::Write;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use fn_error_context::context;

use crate::cloud::{CliCommander, Client, Commander, DEFAULT_PROGRAM};
use crate::config::CloudConfig;
use crate::image::{ImageFilter, DEFAULT_ARCH, DEFAULT_CHANNEL, DEFAULT_RELEASE};

/// Selection of the image family; unset values fall back to the
/// configuration file, then to built-in defaults.
#[derive(Debug, clap::Args, PartialEq, Eq, Default)]
pub(crate) struct FilterOpts {
    /// Release of the image family (default: rolling)
    #[clap(long, global = true)]
    pub(crate) release: Option<String>,

    /// Channel of the image family (default: edge)
    #[clap(long, global = true)]
    pub(crate) channel: Option<String>,

    /// Architecture of the image family (default: amd64)
    #[clap(long, global = true)]
    pub(crate) arch: Option<String>,
}

impl FilterOpts {
    fn resolve(self, config: &CloudConfig) -> ImageFilter {
        let pick = |flag: Option<String>, conf: &Option<String>, default: &str| {
            flag.or_else(|| conf.clone())
                .unwrap_or_else(|| default.to_string())
        };
        ImageFilter {
            release: pick(self.release, &config.release, DEFAULT_RELEASE),
            channel: pick(self.channel, &config.channel, DEFAULT_CHANNEL),
            arch: pick(self.arch, &config.arch, DEFAULT_ARCH),
        }
    }
}

/// The registry tool to run: the flag, then the configuration file, then
/// [`DEFAULT_PROGRAM`].
fn resolve_program(flag: Option<String>, config: &CloudConfig) -> String {
    flag.or_else(|| config.openstack.clone())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

/// Options for uploading a new image
#[derive(Debug, Parser, PartialEq, Eq)]
pub(crate) struct CreateOpts {
    /// Version number of the new image
    #[clap(long)]
    pub(crate) version: u64,

    /// Path to the image file to upload
    pub(crate) path: Utf8PathBuf,
}

/// Manage versioned Ubuntu Core images in an OpenStack image registry
#[derive(Debug, Parser, PartialEq, Eq)]
#[clap(name = "cloudimg", version)]
pub(crate) struct Opt {
    #[clap(flatten)]
    pub(crate) filter: FilterOpts,

    /// Registry command line tool to run (default: openstack)
    #[clap(long, global = true)]
    pub(crate) openstack: Option<String>,

    #[clap(subcommand)]
    pub(crate) cmd: Cmd,
}

/// Operations on the image registry
#[derive(Debug, clap::Subcommand, PartialEq, Eq)]
pub(crate) enum Cmd {
    /// Print the highest version of the image family
    LatestVersion,

    /// Print the names of all images of the family, newest first
    ListVersions {
        /// Output a JSON array instead of one name per line
        #[clap(long)]
        json: bool,
    },

    /// Print the image name for a given version of the family
    ImageId {
        /// Version number
        #[clap(long)]
        version: u64,
    },

    /// Upload an image file as a new version of the family
    Create(CreateOpts),

    /// Delete images by name
    Delete {
        /// Names of the images to delete
        #[clap(required = true)]
        images: Vec<String>,
    },

    /// Delete all but the newest images of the family
    Purge {
        /// Number of versions to keep
        #[clap(long, default_value_t = 3)]
        keep: usize,
    },
}

/// Execute one subcommand against `client`, writing results to `out`.
fn run_cmd<C: Commander>(
    client: &Client<C>,
    filter: &ImageFilter,
    cmd: Cmd,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        Cmd::LatestVersion => {
            let version = client.get_latest_version(filter)?;
            writeln!(out, "{version}")?;
        }
        Cmd::ListVersions { json } => {
            let names = client.get_versions(filter)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &names)?;
                writeln!(out)?;
            } else {
                for name in names {
                    writeln!(out, "{name}")?;
                }
            }
        }
        Cmd::ImageId { version } => {
            writeln!(out, "{}", filter.image_id(version))?;
        }
        Cmd::Create(opts) => {
            client
                .create(&opts.path, filter, opts.version)
                .with_context(|| format!("Creating version {} of {filter}", opts.version))?;
        }
        Cmd::Delete { images } => {
            client.delete(&images)?;
        }
        Cmd::Purge { keep } => {
            for name in client.purge(filter, keep)? {
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(())
}

/// Parse the provided arguments and execute.
/// Calls [`clap::Error::exit`] on failure, printing the error message and aborting the program.
#[context("Running")]
pub fn run_from_iter<I>(args: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    let opt = Opt::parse_from(args);
    let config = CloudConfig::load()?.unwrap_or_default();
    let program = resolve_program(opt.openstack, &config);
    let filter = opt.filter.resolve(&config);
    tracing::debug!("Using {program} for image family {filter}");
    let client = Client::with_program(CliCommander, program);
    let mut stdout = std::io::stdout().lock();
    run_cmd(&client, &filter, opt.cmd, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
