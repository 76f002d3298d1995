//! Client for the image registry, driven through its command line tool.

use std::process::Command;

use camino::Utf8Path;
use cloudimg_utils::CommandRunExt;

use crate::error::{Error, Result};
use crate::image::{parse_image_list, ImageFilter, ImageVersion};

/// The registry tool invoked when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "openstack";

/// Runs an external command and returns what it printed on stdout.
///
/// `argv` holds the program followed by its arguments. An error is returned
/// if the program cannot be spawned or exits unsuccessfully.
pub trait Commander {
    /// Execute `argv` and capture its standard output.
    fn exec_command(&self, argv: &[&str]) -> anyhow::Result<String>;
}

impl<C: Commander + ?Sized> Commander for &C {
    fn exec_command(&self, argv: &[&str]) -> anyhow::Result<String> {
        (**self).exec_command(argv)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliCommander;

impl Commander for CliCommander {
    fn exec_command(&self, argv: &[&str]) -> anyhow::Result<String> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("Empty command line"))?;
        Command::new(program).args(args).log_debug().run_get_string()
    }
}

/// Lists, creates and deletes images of the registry.
#[derive(Debug)]
pub struct Client<C> {
    cli: C,
    program: String,
}

impl<C: Commander> Client<C> {
    /// Create a client invoking the default `openstack` tool.
    pub fn new(cli: C) -> Self {
        Self::with_program(cli, DEFAULT_PROGRAM)
    }

    /// Create a client invoking `program` as the registry tool.
    pub fn with_program(cli: C, program: impl Into<String>) -> Self {
        Self {
            cli,
            program: program.into(),
        }
    }

    fn exec(&self, args: &[&str]) -> Result<String> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(self.program.as_str());
        argv.extend_from_slice(args);
        Ok(self.cli.exec_command(&argv)?)
    }

    fn list_images(&self, filter: &ImageFilter) -> Result<Vec<ImageVersion>> {
        let output = self.exec(&["image", "list", "--property", "status=active"])?;
        parse_image_list(&output, filter)
    }

    /// Return the highest version of the family present in the registry.
    pub fn get_latest_version(&self, filter: &ImageFilter) -> Result<u64> {
        self.list_images(filter)?
            .into_iter()
            .map(|image| image.version)
            .max()
            .ok_or_else(|| Error::VersionNotFound {
                release: filter.release.clone(),
                channel: filter.channel.clone(),
                arch: filter.arch.clone(),
            })
    }

    /// Return the names of all images of the family, newest first.
    ///
    /// Duplicate entries in the listing are preserved.
    pub fn get_versions(&self, filter: &ImageFilter) -> Result<Vec<String>> {
        let mut images = self.list_images(filter)?;
        images.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(images.into_iter().map(|image| image.name).collect())
    }

    /// Upload the image file at `path` as `version` of the family.
    pub fn create(&self, path: &Utf8Path, filter: &ImageFilter, version: u64) -> Result<()> {
        let image_id = filter.image_id(version);
        tracing::info!("Creating {image_id} from {path}");
        self.exec(&["image", "create", "--file", path.as_str(), image_id.as_str()])?;
        Ok(())
    }

    /// Delete the named images with a single invocation.
    pub fn delete<S: AsRef<str>>(&self, images: &[S]) -> Result<()> {
        if images.is_empty() {
            tracing::debug!("No images to delete");
            return Ok(());
        }
        let mut args = vec!["image", "delete"];
        args.extend(images.iter().map(AsRef::as_ref));
        tracing::info!("Deleting {} image(s)", images.len());
        self.exec(&args)?;
        Ok(())
    }

    /// Delete all but the newest `keep` images of the family, returning
    /// the names that were removed.
    pub fn purge(&self, filter: &ImageFilter, keep: usize) -> Result<Vec<String>> {
        let versions = self.get_versions(filter)?;
        let old = versions.get(keep..).unwrap_or_default().to_vec();
        tracing::debug!(
            "Purging {filter}: {} present, keeping {keep}",
            versions.len()
        );
        self.delete(&old)?;
        Ok(old)
    }
}
