use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use trackswitch_core::{shutdown, ConfigManager, MidiTransport, PortListing, Remapper, Settings};

mod signal;

/// Remap controller buttons to one-track-at-a-time transport commands.
#[derive(Parser, Debug)]
#[command(name = "trackswitch")]
#[command(about = "Control Change remapper for a virtual MIDI bus")]
struct Args {
    /// JSON settings file (defaults apply when it does not exist)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Controller input port name, or part of it
    #[arg(long)]
    input: Option<String>,

    /// Virtual bus output port name, or part of it
    #[arg(long)]
    output: Option<String>,

    /// Print the available MIDI ports and exit
    #[arg(long, default_value = "false")]
    list_ports: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings, anyhow::Error> {
    let mut manager = ConfigManager::new(args.config.clone());
    let mut settings = manager
        .load()
        .with_context(|| format!("loading {}", manager.config_path().display()))?;

    if let Some(input) = &args.input {
        settings.input_port = input.clone();
    }
    if let Some(output) = &args.output {
        settings.output_port = output.clone();
    }
    settings.validate()?;

    Ok(settings)
}

fn log_ports(ports: &PortListing) {
    log::info!("Output ports: {:?}", ports.outputs);
    log::info!("Input ports: {:?}", ports.inputs);
}

async fn run(args: Args) -> Result<(), anyhow::Error> {
    let settings = load_settings(&args)?;

    let ports = MidiTransport::list_ports(&settings.client_name)?;
    if args.list_ports {
        println!("Inputs:");
        for name in &ports.inputs {
            println!("  {}", name);
        }
        println!("Outputs:");
        for name in &ports.outputs {
            println!("  {}", name);
        }
        return Ok(());
    }
    log_ports(&ports);

    let (mut listener, mut sink) = MidiTransport::open(&settings)?;
    let events = listener
        .take_events()
        .context("MIDI input has no event stream")?;

    let (trigger, shutdown_signal) = shutdown::channel();
    tokio::spawn(async move {
        signal::wait_for_termination().await;
        trigger.trigger();
    });

    log::info!(
        "Connected to '{}' and '{}', listening for control changes...",
        listener.port_name(),
        sink.port_name()
    );

    let stats = Remapper::new(&settings).run(events, &mut sink, shutdown_signal).await;

    log::info!("Shutting down...");
    log::info!(
        "Handled {} presses ({} events), {} sends, {} failed",
        stats.events_mapped,
        stats.events_received,
        stats.sends_attempted,
        stats.sends_failed
    );

    listener.close();
    sink.close();
    Ok(())
}
