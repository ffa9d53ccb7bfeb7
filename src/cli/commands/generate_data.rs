use anyhow::{Context, Result};
use chrono::{Months, Utc};
use model::{JsonFileStore, generate_dataset};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{debug, info};

/// Write a mock dataset of `count` transactions to `output`, starting about a
/// year before now so the dashboard has history to filter.
pub async fn generate_data(output: &Path, count: usize, seed: Option<u64>) -> Result<()> {
    let start = Utc::now()
        .naive_utc()
        .checked_sub_months(Months::new(12))
        .context("Start date out of range")?;
    debug!("Generating {} transactions from {}", count, start);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let envelope = generate_dataset(count, start, &mut rng);

    JsonFileStore::new(output)
        .save_dataset(&envelope)
        .await
        .with_context(|| format!("Failed to write dataset to {}", output.display()))?;

    info!(
        "Wrote {} transactions to {}",
        envelope.data.transaction_count,
        output.display()
    );
    Ok(())
}
