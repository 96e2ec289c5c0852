// SPDX-License-Identifier: MPL-2.0
use minerama::app::{self, paths, Flags};
use minerama::config;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: minerama [OPTIONS] [FILES...]

Options:
  --lang <id>          UI language (e.g. en-US, fr)
  --config-dir <dir>   Directory holding settings.toml
  --data-dir <dir>     Directory holding state.cbor
  --media-dir <dir>    Directory holding the episode videos
  -h, --help           Print this help";

struct Args {
    lang: Option<String>,
    overrides: paths::CliOverrides,
    files: Vec<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let overrides = paths::CliOverrides {
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        media_dir: args.opt_value_from_str("--media-dir")?,
    };
    let files = args.finish().into_iter().map(PathBuf::from).collect();

    Ok(Some(Args {
        lang,
        overrides,
        files,
    }))
}

fn main() -> iced::Result {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("minerama: {err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(args.overrides);
    let (config, config_warning) = config::load();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.logging.level_filter()).into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting minerama");

    app::run(Flags {
        lang: args.lang,
        files: args.files,
        config,
        config_warning,
    })
}
