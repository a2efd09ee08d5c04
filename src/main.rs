// SPDX-License-Identifier: MPL-2.0
use rfid_display::app::{self, paths, Flags};
use rfid_display::error::Error;
use rfid_display::{config, logging, video_player};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: rfid_display [OPTIONS]

Options:
  --config <FILE>     Tag mapping file (default: config.json, env RFID_DISPLAY_CONFIG)
  --media-dir <DIR>   Media directory (default: data/images, env RFID_DISPLAY_MEDIA_DIR)
  --windowed          Stay in a normal window instead of going fullscreen
  --verbose           Enable debug logging (RUST_LOG is honored)
  -h, --help          Print this help";

struct Args {
    config: Option<PathBuf>,
    media_dir: Option<PathBuf>,
    windowed: bool,
    verbose: bool,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        media_dir: args.opt_value_from_str("--media-dir")?,
        windowed: args.contains("--windowed"),
        verbose: args.contains("--verbose"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: ignoring unexpected arguments: {remaining:?}");
    }

    Ok(Some(parsed))
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(args.verbose);

    let config_path = paths::config_file(args.config);
    let media_dir = paths::media_dir(args.media_dir);

    let config = match config::load_from_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %config_path.display(), "failed to load configuration");
            match e {
                Error::ConfigMissing(_) => eprintln!("{e}"),
                other => eprintln!("{other}\nFix or recreate {}.", config_path.display()),
            }
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        path = %config_path.display(),
        tags = config.rfid_mappings.len(),
        "configuration loaded"
    );

    // Videos still fail individually if this does not succeed.
    if let Err(e) = video_player::init_ffmpeg() {
        tracing::warn!(error = %e, "video playback unavailable");
    }

    let flags = Flags {
        config,
        media_dir,
        windowed: args.windowed,
    };

    match app::run(flags) {
        Ok(()) => {
            tracing::info!("display stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "display terminated with an error");
            ExitCode::FAILURE
        }
    }
}
