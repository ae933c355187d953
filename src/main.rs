use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use avatars::{
    batch::{Batch, COUNT, FORMAT, SIZE, TARGET},
    encode::Format,
    schema::StyleSchema,
    style::{Peeps, Style},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// number of avatars to create
    #[arg(short = 'n', long, default_value_t = COUNT as u64, value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// directory the avatars are written to
    #[arg(short, long, default_value = TARGET)]
    target: PathBuf,

    /// `png`, `jpg` or `jpeg`, anything else writes the raw SVG markup
    #[arg(short, long, default_value = FORMAT)]
    format: Format,

    /// width and height of the avatars, in pixels
    #[arg(short, long, default_value_t = SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// a JSON schema to use instead of the one embedded in the style
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot init logger: {}", e))?;

    let cli = Cli::parse();

    let style = match &cli.schema {
        Some(path) => {
            info!("reading schema from `{:?}`", path);
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("could not read schema `{:?}`", path))?;
            Peeps::with_schema(StyleSchema::from_json(&json)?)
        }
        None => Peeps::new()?,
    };
    info!(
        "style {:?} with {} properties",
        style.schema().title,
        style.schema().len()
    );

    let count = usize::try_from(cli.count).context("too many avatars")?;
    let batch = Batch::new(count, &cli.target, cli.format, cli.size);
    let generated = batch
        .run(&style)
        .with_context(|| format!("could not generate avatars into `{:?}`", batch.target))?;

    info!("created {} avatars in `{:?}`", generated.len(), batch.target);

    Ok(())
}
