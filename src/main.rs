use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use requant::{dequantize_multiplier, quantize_multiplier, RescaleConfig, Rescaler, RoundingMode};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Apply quantized multipliers to i32 accumulators", long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rescale one accumulator value
    Apply {
        /// Accumulator value
        #[arg(allow_hyphen_values = true)]
        x: i32,

        /// Fixed-point multiplier (value scaled by 2^31)
        #[arg(long, conflicts_with = "scale")]
        multiplier: Option<i32>,

        /// Real scale, quantized to multiplier/shift before applying
        #[arg(long)]
        scale: Option<f64>,

        /// Shift in [-31, 7] (ignored with --scale)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,

        /// Rounding mode: 'baseline' or 'EV'. Defaults to TF_QUANTIZED_ROUND
        #[arg(long)]
        mode: Option<RoundingMode>,

        /// Trace operands and result. Defaults to TF_SHOW_DATA
        #[arg(long)]
        trace: bool,

        /// Print a JSON record instead of the bare result
        #[arg(long)]
        json: bool,
    },
    /// Convert a real scale into a quantized multiplier and shift
    Quantize {
        scale: f64,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ApplyRecord {
    x: i32,
    multiplier: i32,
    shift: i32,
    config: RescaleConfig,
    result: i32,
}

#[derive(Serialize)]
struct QuantizeRecord {
    scale: f64,
    multiplier: i32,
    shift: i32,
    effective: f64,
}

fn resolve_config(mode: Option<RoundingMode>, trace: bool) -> RescaleConfig {
    match mode {
        // Explicit mode: the mode setting is never read.
        Some(m) => RescaleConfig::new(m, trace || requant::trace::process_trace_enabled()),
        None => {
            let mut cfg = RescaleConfig::process();
            cfg.trace |= trace;
            cfg
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.cmd {
        Command::Apply { x, multiplier, scale, shift, mode, trace, json } => {
            let (multiplier, shift) = match (multiplier, scale) {
                (Some(m), _) => (m, shift),
                (None, Some(s)) => quantize_multiplier(s).with_context(|| format!("quantize scale {}", s))?,
                (None, None) => anyhow::bail!("one of --multiplier or --scale is required"),
            };
            if !(requant::rescale::MIN_SHIFT..=requant::rescale::MAX_SHIFT).contains(&shift) {
                anyhow::bail!("shift {} outside [-31, 7]", shift);
            }
            let config = resolve_config(mode, trace);
            let result = Rescaler::new(config).apply(x, multiplier, shift);
            if json {
                let rec = ApplyRecord { x, multiplier, shift, config, result };
                println!("{}", serde_json::to_string(&rec).context("serialize result")?);
            } else {
                println!("{}", result);
            }
        }
        Command::Quantize { scale, json } => {
            let (multiplier, shift) = quantize_multiplier(scale).with_context(|| format!("quantize scale {}", scale))?;
            let effective = dequantize_multiplier(multiplier, shift);
            if json {
                let rec = QuantizeRecord { scale, multiplier, shift, effective };
                println!("{}", serde_json::to_string(&rec).context("serialize result")?);
            } else {
                println!("multiplier={} shift={} effective={:.12}", multiplier, shift, effective);
            }
        }
    }
    Ok(())
}
