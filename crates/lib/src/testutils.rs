//! Test doubles for the registry command line.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use indoc::indoc;

use crate::cloud::Commander;
use crate::image::ImageFilter;

/// Unrelated images that surround the ones under test in a listing.
const LISTING_HEAD: &str = indoc! {"
    +--------------------------------------+------------------------------------------------------------------------------------------------------+
    | ID                                   | Name                                                                                                 |
    +--------------------------------------+------------------------------------------------------------------------------------------------------+
    | 06c12690-08ef-4a9b-aaa6-6e8249bcfef8 | ubuntu-released/ubuntu-oneiric-11.10-amd64-server-20130509-disk1.img                                 |
    | 8fa0213b-e598-473f-bb33-901281063395 | smoser-cloud-images/ubuntu-hardy-8.04-amd64-server-20121003                                          |
    | 47537aad-dcdb-422e-9302-2f874f88f216 | quantal-desktop-amd64                                                                                |
"};

const LISTING_TAIL: &str = indoc! {"
    | 762d5ce2-fbc2-4685-8d6c-71249d19df9e | ubuntu-core/devel/ubuntu-1504-snappy-core-amd64-edge-20151020-disk1.img                              |
    | 08763be0-3b3d-41e3-b5b0-08b9006fc1d7 | smoser-lucid-loader/lucid-amd64-linux-image-2.6.32-34-virtual-v-2.6.32-34.77~smloader0-build0-loader |
    | bf412075-2c8d-4753-8d19-4e502cf57d8d | None                                                                                                 |
    +--------------------------------------+------------------------------------------------------------------------------------------------------+
"};

/// One listing row for `version` of `filter`'s family.
pub(crate) fn version_line(filter: &ImageFilter, version: u64) -> String {
    format!(
        "| 762d5ce2-fbc2-4685-8d6c-71249d19df9e | {}                        |",
        filter.image_id(version)
    )
}

/// A full listing with `lines` placed among unrelated images.
pub(crate) fn listing(lines: &[String]) -> String {
    let mut r = String::from(LISTING_HEAD);
    for line in lines {
        r.push_str(line);
        r.push('\n');
    }
    r.push_str(LISTING_TAIL);
    r
}

/// Records every command line it is asked to run and replies with a canned
/// output, or an error when configured to fail.
#[derive(Debug, Default)]
pub(crate) struct FakeCommander {
    calls: RefCell<HashMap<String, usize>>,
    output: String,
    fail: Cell<bool>,
}

impl FakeCommander {
    pub(crate) fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }

    pub(crate) fn failing() -> Self {
        let r = Self::default();
        r.fail.set(true);
        r
    }

    /// How many times exactly this space-joined command line ran.
    pub(crate) fn calls(&self, cmdline: &str) -> usize {
        self.calls.borrow().get(cmdline).copied().unwrap_or_default()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }
}

impl Commander for FakeCommander {
    fn exec_command(&self, argv: &[&str]) -> anyhow::Result<String> {
        *self.calls.borrow_mut().entry(argv.join(" ")).or_default() += 1;
        if self.fail.get() {
            anyhow::bail!("exec error");
        }
        Ok(self.output.clone())
    }
}
