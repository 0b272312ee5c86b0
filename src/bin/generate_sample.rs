use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Write synthetic benchmark CSVs for trying out csv-plot.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Directory to write the sample files into
    #[arg(default_value = "sample_data")]
    out_dir: PathBuf,

    /// Seed for the noise generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Build label and per-step cost multiplier.
const BUILDS: [(&str, f64); 3] = [("gnu-O2", 1.0), ("gnu-O3", 0.8), ("intel-O3", 0.65)];

/// Problem sizes, one row each.
const SCALES: [u32; 6] = [64, 128, 256, 512, 1024, 2048];

const HEADER: [&str; 5] = [
    "build",
    "scale",
    "time_stepping_total",
    "momentum_total",
    "continuity_total",
];

/// Seeded multiplicative noise for the synthetic timings (splitmix64 stream).
struct Jitter {
    state: u64,
}

impl Jitter {
    fn new(seed: u64) -> Self {
        Jitter { state: seed }
    }

    /// Uniform draw in `[0, 1)` from the top 53 bits of the next output.
    fn unit(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Factor in `[1 - amount, 1 + amount)`.
    fn factor(&mut self, amount: f64) -> f64 {
        1.0 + amount * (2.0 * self.unit() - 1.0)
    }
}

/// Timings grow with the square of the problem size.
fn sample_row(build: &str, cost: f64, scale: u32, noise: &mut Jitter) -> Vec<String> {
    let cells = f64::from(scale).powi(2) * 1e-6 * cost;
    let momentum = cells * 0.55 * noise.factor(0.05);
    let continuity = cells * 0.25 * noise.factor(0.05);
    let total = (momentum + continuity) * 1.2 * noise.factor(0.02);
    vec![
        build.to_string(),
        scale.to_string(),
        format!("{total:.6}"),
        format!("{momentum:.6}"),
        format!("{continuity:.6}"),
    ]
}

fn write_build(dir: &Path, build: &str, cost: f64, noise: &mut Jitter) -> Result<PathBuf> {
    let path = dir.join(format!("{build}.csv"));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for scale in SCALES {
        writer.write_record(sample_row(build, cost, scale, noise))?;
    }
    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut noise = Jitter::new(args.seed);
    for (build, cost) in BUILDS {
        let path = write_build(&args.out_dir, build, cost, &mut noise)?;
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_noise() {
        let mut a = Jitter::new(7);
        let mut b = Jitter::new(7);
        let mut c = Jitter::new(8);
        let first: Vec<f64> = (0..10).map(|_| a.factor(0.05)).collect();
        let again: Vec<f64> = (0..10).map(|_| b.factor(0.05)).collect();
        let other: Vec<f64> = (0..10).map(|_| c.factor(0.05)).collect();
        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn factor_stays_in_range() {
        let mut noise = Jitter::new(1);
        for _ in 0..1000 {
            let j = noise.factor(0.05);
            assert!((0.95..1.05).contains(&j));
        }
    }

    #[test]
    fn writes_one_file_per_build_with_all_scales() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut noise = Jitter::new(3);
        let path = write_build(dir.path(), "b", 1.0, &mut noise).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap(), HEADER.to_vec());
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), SCALES.len());
        assert_eq!(&rows[0][0], "b");
        assert_eq!(&rows[0][1], "64");
    }
}
