use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use speedgraph::data::model::Series;

/// Write a synthetic pair of result files (`results`, `results-vec`) in the
/// `<size> <push_back> <remove> <insert> <get>` layout.
#[derive(Debug, Parser)]
#[command(about)]
struct Args {
    /// Output directory.
    #[arg(long, default_value = "sample_data")]
    out_dir: PathBuf,

    /// Number of lines per file; sizes run from 1 to this value.
    #[arg(long, default_value_t = 200_000)]
    rows: i64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Noisy timing around `mean` nanoseconds, never below 1.
    fn timing(&mut self, mean: f64) -> i64 {
        self.gauss(mean, mean * 0.3).max(1.0).round() as i64
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    // Balanced tree: every operation walks O(log n) nodes.
    // Vector: amortised O(1) push_back and get, O(n) remove and insert.
    let mut tree = Series::with_width(4);
    let mut vector = Series::with_width(4);
    for n in 1..=args.rows {
        let depth = (n as f64).log2().max(1.0);
        tree.push_row(
            n,
            &[
                rng.timing(60.0 * depth),
                rng.timing(90.0 * depth),
                rng.timing(95.0 * depth),
                rng.timing(25.0 * depth),
            ],
        )?;
        vector.push_row(
            n,
            &[
                rng.timing(20.0),
                rng.timing(15.0 + 0.05 * n as f64),
                rng.timing(15.0 + 0.05 * n as f64),
                rng.timing(5.0),
            ],
        )?;
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {:?}", args.out_dir))?;
    for (name, series) in [("results", &tree), ("results-vec", &vector)] {
        let path = args.out_dir.join(name);
        let file = File::create(&path).with_context(|| format!("failed to create {path:?}"))?;
        series
            .write_to(BufWriter::new(file))
            .with_context(|| format!("failed to write {path:?}"))?;
        println!("Wrote {} rows to {}", series.len(), path.display());
    }

    Ok(())
}
