//! Implementing the logic for the different CLI commands.

use std::process::ExitCode;
use std::time::Instant;
use std::rc::Rc;

use chrono::Utc;

use msm::manifest::{self, VersionTable};
use msm::server::{DownloadStatus, ServerVersion};
use msm::download;

use crate::parse::{CliArgs, CliCmd, DownloadArgs, InfoArgs, UpdateArgs};
use crate::output::{LogLevel, Output};
use crate::format::{self, BytesFmt, TimeDeltaDisplay};


pub fn main(args: &CliArgs) -> ExitCode {

    let mut out = Output::new(match args.verbose {
        0 => LogLevel::Progress,
        1.. => LogLevel::Info,
    });

    match &args.cmd {
        CliCmd::Download(download_args) => download(&mut out, args, download_args),
        CliCmd::Info(info_args) => info(&mut out, args, info_args),
        CliCmd::Update(update_args) => update(&mut out, args, update_args),
    }

}

fn download(out: &mut Output, args: &CliArgs, download_args: &DownloadArgs) -> ExitCode {

    let Some(table) = request_table(out, args) else {
        return ExitCode::FAILURE;
    };

    let Some(version) = find_version(out, &table, &download_args.version) else {
        return ExitCode::FAILURE;
    };

    out.progress(format_args!("Downloading minecraft_server.{}.jar", version.id()));
    match version.download(CommonHandler::new(&mut *out)) {
        Ok(DownloadStatus::Downloaded) =>
            out.success(format_args!("Downloaded {}", version.file_path().display())),
        Ok(DownloadStatus::AlreadyDownloaded) =>
            out.success(format_args!("Already downloaded {}", version.file_path().display())),
        Err(e) => {
            out.error(format_args!("Failed to download {}: {e}", version.id()));
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS

}

fn info(out: &mut Output, args: &CliArgs, info_args: &InfoArgs) -> ExitCode {

    let Some(table) = request_table(out, args) else {
        return ExitCode::FAILURE;
    };

    let Some(version) = find_version(out, &table, &info_args.version) else {
        return ExitCode::FAILURE;
    };

    out.progress(format_args!("Requesting detail document of {}", version.id()));
    let detail = match version.detail() {
        Ok(detail) => detail,
        Err(e) => {
            out.error(format_args!("Failed to request detail document of {}: {e}", version.id()));
            return ExitCode::FAILURE;
        }
    };

    out.success(format_args!("Version {}", version.id()));
    out.field("type", version.channel());

    if let Some(time) = version.release_time() {
        let delta = Utc::now().signed_duration_since(time);
        out.field("released", format_args!("{} ({})", time.format(format::DATE_FORMAT), TimeDeltaDisplay(delta)));
    }

    out.field("java_version", detail.java_major_version());
    out.field("minimum_launcher_version", detail.min_launcher_version());
    out.field("server_url", detail.server_url());
    out.field("server_file_size", format_args!("{} ({})", BytesFmt(detail.server_size()), detail.server_size()));
    out.field("client_file_size", format_args!("{} ({})", BytesFmt(detail.client_size()), detail.client_size()));
    out.field("meta_url", version.metadata_url());
    out.field("file", version.file_path().display());

    ExitCode::SUCCESS

}

fn update(out: &mut Output, _args: &CliArgs, _update_args: &UpdateArgs) -> ExitCode {
    out.error("The update command is not implemented yet");
    ExitCode::FAILURE
}

/// Request the version manifest and resolve the version table, writing any error
/// on the output.
fn request_table(out: &mut Output, args: &CliArgs) -> Option<VersionTable> {

    out.progress("Requesting version manifest");
    let table = match manifest::request(&args.manifest_url, &args.folder, CommonHandler::new(&mut *out)) {
        Ok(table) => table,
        Err(e) => {
            out.error(format_args!("Failed to request version manifest: {e}"));
            return None;
        }
    };

    out.info(format_args!("Version manifest resolved with {} keys", table.len()));
    Some(table)

}

/// Look up the given version id in the table, an unknown id writes an error with
/// a hint on the output.
fn find_version<'t>(out: &mut Output, table: &'t VersionTable, id: &str) -> Option<&'t Rc<ServerVersion>> {
    let version = table.get(id);
    if version.is_none() {
        out.error(format_args!("{id} is not a known version, try 'latest_release' for the latest stable version"));
    }
    version
}


/// Generic handler for the library event handlers (manifest and download).
#[derive(Debug)]
pub struct CommonHandler<'a> {
    /// Handle to the output.
    out: &'a mut Output,
    /// If a download is running, this contains the instant it started, for speed calc.
    download_start: Option<Instant>,
}

impl<'a> CommonHandler<'a> {

    pub fn new(out: &'a mut Output) -> Self {
        Self {
            out,
            download_start: None,
        }
    }

}

impl manifest::Handler for CommonHandler<'_> {
    fn handle_invalid_version(&mut self, index: usize, error: &serde_path_to_error::Error<serde_json::Error>) {
        self.out.warning(format_args!("Skipping invalid manifest entry #{index}: {error}"));
    }
}

impl download::Handler for CommonHandler<'_> {
    fn handle_download_progress(&mut self, size: u64, total_size: Option<u64>) {

        let start = *self.download_start.get_or_insert_with(Instant::now);
        let elapsed = start.elapsed().as_secs_f32();
        let speed = if elapsed > 0.0 { size as f32 / elapsed } else { 0.0 };
        let (speed_fmt, speed_suffix) = format::number_si_unit(speed);

        match total_size {
            Some(total_size) if total_size != 0 => {
                let progress = (size as f32 / total_size as f32).min(1.0) * 100.0;
                self.out.progress(format_args!("Downloading: {progress:.1}% {speed_fmt:.1} {speed_suffix}B/s"));
            }
            _ => {
                let (size_fmt, size_suffix) = format::number_si_unit(size as f32);
                self.out.progress(format_args!("Downloading: {size_fmt:.1} {size_suffix}B {speed_fmt:.1} {speed_suffix}B/s"));
            }
        }

    }
}
