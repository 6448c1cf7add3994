//! Wavescope - PCM player and visualizer
use clap::Parser;
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wavescope::{app, open_input, resolve_descriptor, AppConfig, Cli, ScopeApp, WINDOW_TITLE};
use wavescope_audio_desktop::{CpalSink, Volume};
use wavescope_core::ScopeError;
use wavescope_playback::{Pipeline, PipelineContext};
use wavescope_visual::DisplayList;

/// Exit code for failures outside the error taxonomy
const EXIT_OTHER: u8 = 1;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wavescope=info,wavescope_audio=info,wavescope_playback=info,wavescope_audio_desktop=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{:#}", e);
            let code = e
                .downcast_ref::<ScopeError>()
                .map_or(EXIT_OTHER, |scope| scope.exit_code() as u8);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Configuration is complete before any I/O
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli(cli);
    config.validate()?;
    let layout = config.layout()?;
    let mode = config.mode()?;
    let explicit = cli.explicit_descriptor()?;

    let mut input = open_input(cli)?;
    let descriptor = resolve_descriptor(explicit, &mut input)?;

    let sink = CpalSink::open(
        &descriptor,
        Volume::new(config.audio.volume),
        config.audio.queue_depth,
    )
    .map_err(ScopeError::from)?;

    let context = PipelineContext::new(descriptor, mode, layout);
    let pipeline = Pipeline::new(context, input, sink, DisplayList::new());
    let outcome: app::Outcome = Rc::new(RefCell::new(None));
    let scope_app = ScopeApp::new(pipeline, Rc::clone(&outcome));

    eframe::run_native(
        WINDOW_TITLE,
        app::native_options(layout),
        Box::new(|_cc| Ok(Box::new(scope_app))),
    )
    .map_err(|e| ScopeError::surface(format!("Failed to open window: {}", e)))?;

    match outcome.take() {
        Some(Ok(stats)) => {
            tracing::info!(
                "Played {} chunks, drew {} frames",
                stats.chunks_played,
                stats.frames_presented
            );
            Ok(())
        }
        Some(Err(e)) => Err(e.into()),
        None => {
            tracing::info!("Window closed before the end of input");
            Ok(())
        }
    }
}
