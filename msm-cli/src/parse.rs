//! Implementation of the command line parser, using clap struct derivation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use msm::manifest::VERSION_MANIFEST_URL;


/// Command line utility for downloading and inspecting Minecraft server versions
/// listed by the Mojang version manifest.
#[derive(Debug, Parser)]
#[command(name = "msm", version, disable_help_subcommand = true, max_term_width = 140)]
pub struct CliArgs {
    #[command(subcommand)]
    pub cmd: CliCmd,
    /// Enable verbose output, the more -v argument you put, the more verbose the
    /// tool will be.
    #[arg(short, env = "MSM_VERBOSE", action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Set the directory where server files are downloaded.
    #[arg(long, env = "MSM_FOLDER", value_name = "PATH", default_value = "server_versions")]
    pub folder: PathBuf,
    /// Override the URL of the version manifest.
    ///
    /// The manifest is an externally defined JSON document listing every known
    /// version with a pointer to its own metadata document, it is requested again
    /// on every command, nothing is cached between invocations.
    #[arg(long, env = "MSM_MANIFEST_URL", value_name = "URL", default_value = VERSION_MANIFEST_URL)]
    pub manifest_url: String,
}

#[derive(Debug, Subcommand)]
pub enum CliCmd {
    Download(DownloadArgs),
    Info(InfoArgs),
    Update(UpdateArgs),
}

/// Download the server file of a specific version.
///
/// The file is written to '<folder>/minecraft_server.<version>.jar', the folder
/// and its missing parents are created if needed. If the file already exists the
/// download is skipped entirely.
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// The version to download, this can be any version id listed by the
    /// manifest, or one of the two aliases 'latest_release' and
    /// 'latest_snapshot'.
    pub version: String,
}

/// Show information about a specific version.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// The version to show information about, this can be any version id listed
    /// by the manifest, or one of the two aliases 'latest_release' and
    /// 'latest_snapshot'.
    pub version: String,
}

/// Download and install the newest server version (not implemented yet).
#[derive(Debug, Args)]
pub struct UpdateArgs { }
