mod app_dir;
mod error;
mod preferences;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use mandelzoom_core::Explorer;

use error::Result;
use preferences::AppPreferences;
use scenario::{Player, Scenario};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "mandelzoom")]
#[command(about = "Play an input scenario through the Mandelbrot explorer and export frames")]
struct Options {
    /// Preferences file (defaults to the OS config directory)
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Directory for exported PNGs (defaults to ./frames)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// JSON scenario to play; the built-in demo runs when omitted
    #[arg(value_name = "SCENARIO")]
    scenario: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn run(opts: Options) -> Result<()> {
    let prefs = match &opts.prefs {
        Some(path) => AppPreferences::load_from(path),
        None => AppPreferences::load(),
    };
    let scenario = match &opts.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            info!("No scenario given; running the built-in demo");
            Scenario::demo()
        }
    };
    let out_dir = opts.out.unwrap_or_else(app_dir::frames_directory);

    let explorer = Explorer::new(prefs.explorer_settings())?;
    let summary = Player::new(explorer, out_dir).run(&scenario)?;
    info!(
        frames = summary.frames,
        exported = summary.exported.len(),
        "Scenario finished"
    );
    for path in &summary.exported {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let opts = Options::parse();
    info!("Starting Mandelzoom");
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("mandelzoom").chain(args.iter().copied()))
    }

    #[test]
    fn no_args_runs_demo() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.prefs, None);
        assert_eq!(opts.out, None);
        assert_eq!(opts.scenario, None);
    }

    #[test]
    fn all_options_in_any_order() {
        let opts = parse(&["--out", "shots", "tour.json", "--prefs", "p.json"]).unwrap();
        assert_eq!(opts.scenario, Some(PathBuf::from("tour.json")));
        assert_eq!(opts.out, Some(PathBuf::from("shots")));
        assert_eq!(opts.prefs, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn missing_value_is_rejected() {
        assert!(parse(&["--out"]).is_err());
    }

    #[test]
    fn unknown_flag_and_extra_scenario_rejected() {
        assert_eq!(
            parse(&["--fast"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert!(parse(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn help_flag() {
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn run_with_scenario_file_exports() {
        let dir = std::env::temp_dir().join("mandelzoom_main_run");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let scenario = dir.join("s.json");
        std::fs::write(&scenario, r#"[{"ticks": 2}, {"export": "one"}]"#).unwrap();
        let prefs = dir.join("prefs.json");
        std::fs::write(&prefs, r#"{"width": 24, "height": 16}"#).unwrap();

        let out = dir.join("out");
        run(Options {
            prefs: Some(prefs),
            scenario: Some(scenario),
            out: Some(out.clone()),
        })
        .unwrap();
        assert!(out.join("one.png").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
