use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};
use trackline::{
    GeometryConfig, GeometryPipeline, ReferenceDriver, SessionRotation, TracklineError,
    telemetry::load_telemetry, writer::write_geometry,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build rotated traces, track boundary and DRS zones for one session
    Process(ProcessArgs),
    /// Write the default configuration to the user config directory
    InitConfig,
}

#[derive(clap::Args, Debug)]
struct ProcessArgs {
    /// JSON-lines file with one driver telemetry record per line
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long)]
    output: PathBuf,

    /// Circuit rotation in degrees
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation: f64,

    #[arg(long)]
    half_width: Option<f64>,

    #[arg(long)]
    zone_gap: Option<f64>,

    /// Keep every n-th sample
    #[arg(long)]
    stride: Option<usize>,

    /// Driver number used for the boundary and zone coordinates (default: first driver)
    #[arg(long)]
    reference_driver: Option<u32>,
}

fn process(args: ProcessArgs) -> Result<(), TracklineError> {
    let mut config = GeometryConfig::from_local_file()?.unwrap_or_default();
    if let Some(half_width) = args.half_width {
        config.half_width = half_width;
    }
    if let Some(zone_gap) = args.zone_gap {
        config.zone_gap = zone_gap;
    }
    if let Some(stride) = args.stride {
        config.sample_stride = stride;
    }
    config.validate()?;

    let reference = args
        .reference_driver
        .map(ReferenceDriver::Number)
        .unwrap_or_default();

    let pipeline = GeometryPipeline::new(config);
    let traces = pipeline.prepare(load_telemetry(&args.input)?)?;
    let geometry = pipeline.build(traces, SessionRotation::degrees(args.rotation), reference)?;
    write_geometry(&args.output, &geometry)?;

    info!("Written to {:?}", args.output);
    info!("  {} telemetry traces", geometry.traces.len());
    info!(
        "  Boundary: {}",
        if geometry.boundary.is_some() { "yes" } else { "no" }
    );
    info!("  {} DRS zones", geometry.drs_zones.len());
    Ok(())
}

fn init_config() -> Result<(), TracklineError> {
    let path = GeometryConfig::default().save()?;
    info!("Default configuration written to {:?}", path);
    Ok(())
}

fn main() {
    colog::init();

    let cli = Args::parse();
    let result = match cli.command {
        Commands::Process(args) => process(args),
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
