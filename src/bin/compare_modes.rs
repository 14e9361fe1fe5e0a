use clap::Parser;
use log::info;
use rayon::prelude::*;
use requant::{Rescaler, RoundingMode};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "requant-compare", about = "Sweep accumulators and report where baseline and even rounding disagree")]
struct Args {
    /// First accumulator in the sweep
    #[arg(long, default_value_t = -4096, allow_hyphen_values = true)]
    from: i32,
    /// Last accumulator in the sweep (inclusive)
    #[arg(long, default_value_t = 4096, allow_hyphen_values = true)]
    to: i32,
    #[arg(long, default_value_t = 1 << 30)]
    multiplier: i32,
    /// Shift in [-31, 7]
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    shift: i32,
    /// Number of disagreeing samples to print
    #[arg(long, default_value_t = 10)]
    show: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    total: u64,
    disagreements: u64,
    max_abs_diff: i64,
    samples: Vec<(i32, i32, i32)>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    if a.from > a.to { anyhow::bail!("empty range {}..={}", a.from, a.to); }
    if !(requant::rescale::MIN_SHIFT..=requant::rescale::MAX_SHIFT).contains(&a.shift) { anyhow::bail!("shift {} outside [-31, 7]", a.shift); }

    let base = Rescaler::with_mode(RoundingMode::Baseline);
    let even = Rescaler::with_mode(RoundingMode::EvenRound);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    info!("sweeping {}..={} multiplier={} shift={} threads={}", a.from, a.to, a.multiplier, a.shift, a.threads);

    let diffs: Vec<(i32, i32, i32)> = pool.install(|| {
        (a.from..=a.to).into_par_iter().filter_map(|x| {
            let b = base.apply(x, a.multiplier, a.shift);
            let e = even.apply(x, a.multiplier, a.shift);
            (b != e).then_some((x, b, e))
        }).collect()
    });

    let report = Report {
        total: (a.to as i64 - a.from as i64 + 1) as u64,
        disagreements: diffs.len() as u64,
        max_abs_diff: diffs.iter().map(|&(_, b, e)| (b as i64 - e as i64).abs()).max().unwrap_or(0),
        samples: diffs.into_iter().take(a.show).collect(),
    };
    if a.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("total={} disagreements={} max_abs_diff={}", report.total, report.disagreements, report.max_abs_diff);
        for (x, b, e) in &report.samples { println!("x={} baseline={} even={}", x, b, e); }
    }
    Ok(())
}
