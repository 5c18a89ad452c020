//! Generate mock ECU map CSV files for manual testing.
//!
//! Writes three maps into `sample_data/`:
//! * `stock_map.csv`  – full coverage, Timing = RPM/1000 + Load/10
//! * `tuned_map.csv`  – same surface advanced by 1.0 degree
//! * `sparse_map.csv` – noisy, with dropped cells and duplicated rows, to
//!   exercise averaging and gap interpolation

use std::path::Path;

use anyhow::{Context, Result};

/// Reference timing surface used by all mock maps.
fn timing_for(rpm: f64, load: f64) -> f64 {
    rpm / 1000.0 + load / 10.0
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
            // splitmix64 to spread the seed across the state
            x = x.wrapping_add(0x9e3779b97f4a7c15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
            *slot = z ^ (z >> 31);
        }
        Self { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = self.state[1]
            .wrapping_mul(5)
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
}

fn write_map(path: &Path, rows: &[(f64, f64, f64)]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["RPM", "Load", "Timing"])?;
    for &(rpm, load, timing) in rows {
        writer.write_record(&[rpm.to_string(), load.to_string(), format!("{timing:.3}")])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let rpm_axis: Vec<f64> = (1..=6).map(|i| (i * 1000) as f64).collect();
    let load_axis: Vec<f64> = [20.0, 40.0, 60.0, 80.0, 100.0].to_vec();

    let out_dir = Path::new("sample_data");
    std::fs::create_dir_all(out_dir).context("creating sample_data directory")?;

    // Stock map: one row per cell, full coverage.
    let mut stock = Vec::new();
    for &load in &load_axis {
        for &rpm in &rpm_axis {
            stock.push((rpm, load, timing_for(rpm, load)));
        }
    }
    write_map(&out_dir.join("stock_map.csv"), &stock)?;

    // Tuned map: the same surface with one degree of extra advance.
    let tuned: Vec<(f64, f64, f64)> = stock
        .iter()
        .map(|&(rpm, load, timing)| (rpm, load, timing + 1.0))
        .collect();
    write_map(&out_dir.join("tuned_map.csv"), &tuned)?;

    // Sparse map: drop ~30% of cells, jitter the rest, and duplicate some
    // rows so the parser has both gaps to fill and duplicates to average.
    let mut rng = SimpleRng::new(42);
    let mut sparse = Vec::new();
    for &load in &load_axis {
        for &rpm in &rpm_axis {
            if rng.next_f64() < 0.3 {
                continue;
            }
            let noisy = timing_for(rpm, load) + rng.gauss(0.0, 0.1);
            sparse.push((rpm, load, noisy));
            if rng.next_f64() < 0.2 {
                sparse.push((rpm, load, timing_for(rpm, load) + rng.gauss(0.0, 0.1)));
            }
        }
    }
    write_map(&out_dir.join("sparse_map.csv"), &sparse)?;

    println!(
        "Wrote {} stock, {} tuned, {} sparse rows to {}",
        stock.len(),
        tuned.len(),
        sparse.len(),
        out_dir.display()
    );
    Ok(())
}
