//! Release gate binary.
//!
//! Run by the release workflow after the build job: verifies that the pushed
//! tag names exactly the version the workspace reports and exits nonzero
//! otherwise, so the publish jobs never ship artifacts under a wrong
//! version.

use anyhow::{Context, Result};
use clap::Parser;
use gisans_release::{verify_tag, PACKAGE_VERSION};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gisans_release",
    about = "Verify a release tag against the workspace version"
)]
struct Args {
    /// Release tag to verify; read from $GITHUB_REF_NAME when omitted.
    #[arg(long)]
    tag: Option<String>,

    /// Version the tag must name.
    #[arg(long, default_value = PACKAGE_VERSION)]
    package_version: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gisans_release=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let tag = match args.tag {
        Some(tag) => tag,
        None => std::env::var("GITHUB_REF_NAME")
            .context("no --tag given and GITHUB_REF_NAME is not set")?,
    };

    verify_tag(&tag, &args.package_version)?;
    info!(tag = %tag, version = %args.package_version, "release tag verified");
    Ok(())
}
