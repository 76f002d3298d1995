//! # Cloud image registry client
//!
//! This crate drives an OpenStack-style image registry through its
//! command line tool to list, upload and delete versioned Ubuntu Core
//! images, and to find the latest version of an image family.

pub mod cli;
mod cloud;
mod config;
mod error;
mod image;

#[cfg(test)]
mod testutils;

pub use cloud::{CliCommander, Client, Commander, DEFAULT_PROGRAM};
pub use config::{CloudConfig, CONFIG_VAR};
pub use error::{Error, Result};
pub use image::{
    parse_image_list, ImageFilter, ImageVersion, DEFAULT_ARCH, DEFAULT_CHANNEL, DEFAULT_RELEASE,
};
