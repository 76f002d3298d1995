//! The main entrypoint for cloudimg, which mostly just calls out to cloudimg-lib.

use anyhow::Result;

fn run() -> Result<()> {
    cloudimg_utils::initialize_tracing();
    tracing::trace!("starting {}", cloudimg_utils::NAME);
    cloudimg_lib::cli::run_from_iter(std::env::args())
}

fn main() {
    cloudimg_utils::run_main(run)
}
