use std::path::PathBuf;

use track_editor_lib::command::execute_json_batch;
use track_editor_lib::fixtures::populate_demo_scene;
use track_editor_lib::harness::TestHarness;
use track_editor_lib::state::EditorSettings;

/// Command-line options
#[derive(Default)]
struct Args {
    /// JSON array of script commands to run
    script: Option<PathBuf>,
    /// Settings file overriding the user config
    config: Option<PathBuf>,
    /// Start from an empty scene instead of the demo entities
    empty: bool,
    /// Write the effective settings to the user config directory
    write_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "track_editor=info,track_editor_lib=info".into()),
        )
        .init();

    let args = parse_args();

    let settings = match &args.config {
        Some(path) => match EditorSettings::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        None => EditorSettings::load(),
    };

    if args.write_config {
        match settings.save() {
            Ok(path) => tracing::info!("Settings written to {}", path.display()),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
    }

    let mut harness = TestHarness::with_settings(settings);
    if !args.empty {
        let ids = populate_demo_scene(harness.track.host_mut());
        tracing::info!("Demo scene ready ({} entities)", ids.len());
    }

    let Some(path) = args.script else {
        tracing::info!("No --script given; nothing to run");
        return;
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read script {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    match execute_json_batch(&mut harness, &json) {
        Ok(responses) => {
            let failed = responses.iter().filter(|r| !r.success).count();
            tracing::info!(
                "Ran {} commands from {} ({failed} failed)",
                responses.len(),
                path.display()
            );
            match serde_json::to_string_pretty(&responses) {
                Ok(out) => println!("{out}"),
                Err(e) => tracing::error!("Failed to serialize responses: {e}"),
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut args = Args::default();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--script" if i + 1 < argv.len() => {
                args.script = Some(PathBuf::from(&argv[i + 1]));
                i += 1;
            }
            "--config" if i + 1 < argv.len() => {
                args.config = Some(PathBuf::from(&argv[i + 1]));
                i += 1;
            }
            "--empty" => args.empty = true,
            "--write-config" => args.write_config = true,
            other => tracing::warn!("Ignoring unknown argument {other}"),
        }
        i += 1;
    }
    args
}
