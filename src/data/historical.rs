use std::{fs, path::Path};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::{data::frame::Bar, error::EnvResult};

/// Reads bars previously written with [`write_bars`].
pub fn read_bars(path: impl AsRef<Path>) -> EnvResult<Vec<Bar>> {
    let path = path.as_ref();
    let file = fs::read(path)?;
    let bars: Vec<Bar> = postcard::from_bytes(&file)?;

    debug!(path = %path.display(), bars = bars.len(), "read historical bars");
    Ok(bars)
}

/// Writes bars as a compact postcard file, creating parent folders as needed.
pub fn write_bars(path: impl AsRef<Path>, bars: &[Bar]) -> EnvResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let encoded = postcard::to_allocvec(bars)?;
    fs::write(path, encoded.as_slice())?;

    info!(path = %path.display(), bars = bars.len(), "wrote historical bars");
    Ok(())
}

/// Geometric random walk starting at `start_price`, for running without downloaded data.
pub fn random_walk_bars(ticks: usize, start_price: f64, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bars = Vec::with_capacity(ticks);
    let mut close = start_price;

    for _ in 0..ticks {
        let open = close;
        close = (open * (1. + rng.gen_range(-0.02..0.02))).max(0.01);
        let spread = open.max(close) * rng.gen_range(0.0..0.01);

        bars.push(Bar {
            open,
            high: open.max(close) + spread,
            low: (open.min(close) - spread).max(0.0),
            close,
            volume: rng.gen_range(1_000.0..10_000.0),
        });
    }

    bars
}
