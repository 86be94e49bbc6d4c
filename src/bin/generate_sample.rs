use std::collections::BTreeMap;
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

    /// Uniform integer in `[lo, hi]`, inclusive.
    fn next_range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as u32
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);

    // Run numbers in the 2018 pp collision range
    let first_run = 314472u32;
    let n_runs = 200;

    let mut doc: BTreeMap<String, Vec<[u32; 2]>> = BTreeMap::new();
    let mut n_ranges = 0usize;

    let mut run = first_run;
    for _ in 0..n_runs {
        // Certified stretches separated by uncertified gaps
        let mut ranges = Vec::new();
        let mut lumi = rng.next_range(1, 20);
        for _ in 0..rng.next_range(1, 6) {
            let end = lumi + rng.next_range(10, 400);
            ranges.push([lumi, end]);
            lumi = end + rng.next_range(2, 30);
        }
        n_ranges += ranges.len();
        doc.insert(run.to_string(), ranges);

        run += rng.next_range(1, 40);
    }

    let output_path = Path::new("sample_certified_runs.json");
    let text = serde_json::to_string_pretty(&doc).context("serializing sample document")?;
    std::fs::write(output_path, text)
        .with_context(|| format!("writing {}", output_path.display()))?;

    // Reload through the public loader as a self-check
    let mask = lumi_mask::load_file(output_path).context("reloading generated file")?;
    assert_eq!(mask.num_runs(), doc.len());

    println!(
        "Wrote {} certified runs ({n_ranges} lumi ranges) to {}",
        doc.len(),
        output_path.display()
    );
    Ok(())
}
