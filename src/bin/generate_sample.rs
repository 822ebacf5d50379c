//! Writes a deterministic sample sales CSV that loads into the dashboard.

use std::path::Path;

use anyhow::{Context, Result};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Write `n_rows` synthetic transactions to `path` in the loader's CSV schema.
fn write_sample_csv(path: &Path, n_rows: usize, seed: u64) -> Result<()> {
    let mut rng = SimpleRng::new(seed);

    let cities = ["Yangon", "Mandalay", "Naypyitaw"];
    let customer_types = ["Member", "Normal"];
    let genders = ["Female", "Male"];

    // Product lines with (typical ticket size, spread).
    let product_lines: [(&str, f64, f64); 6] = [
        ("Electronic accessories", 340.0, 120.0),
        ("Fashion accessories", 310.0, 110.0),
        ("Food and beverages", 320.0, 130.0),
        ("Health and beauty", 290.0, 100.0),
        ("Home and lifestyle", 330.0, 125.0),
        ("Sports and travel", 335.0, 115.0),
    ];

    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    writer
        .write_record([
            "City",
            "Customer_type",
            "Gender",
            "Product line",
            "Total",
            "Rating",
            "Time",
        ])
        .context("writing header")?;

    for _ in 0..n_rows {
        let city = rng.pick(&cities);
        let customer_type = rng.pick(&customer_types);
        let gender = rng.pick(&genders);
        let &(product_line, mean_total, total_spread) = rng.pick(&product_lines);

        let total = rng.gauss(mean_total, total_spread).max(5.0);
        let rating = rng.gauss(7.0, 1.5).clamp(4.0, 10.0);

        // Opening hours 10:00–20:59.
        let hour = 10 + (rng.next_u64() % 11) as u32;
        let minute = (rng.next_u64() % 60) as u32;
        let second = (rng.next_u64() % 60) as u32;

        writer
            .write_record([
                city.to_string(),
                customer_type.to_string(),
                gender.to_string(),
                product_line.to_string(),
                format!("{total:.2}"),
                format!("{rating:.1}"),
                format!("{hour:02}:{minute:02}:{second:02}"),
            ])
            .context("writing row")?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = Path::new("sample_sales.csv");
    let n_rows = 1000;
    write_sample_csv(output_path, n_rows, 42)?;
    println!("Wrote {n_rows} transactions to {}", output_path.display());
    Ok(())
}
