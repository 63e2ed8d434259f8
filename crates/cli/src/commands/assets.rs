//! Product image maintenance.
//!
//! Images can outlive their product when a compensating delete fails or a
//! process dies between writing a file and inserting its row. `sweep` finds
//! such files and removes them.

use std::sync::Arc;
use std::time::Duration;

use shop_api::db::ProductRepository;
use shop_api::services::{AssetStore, ProductCatalog, SweepReport};

use super::{CommandError, connect};

/// Remove unreferenced image files older than `min_age_minutes`.
pub async fn sweep(min_age_minutes: u64, dry_run: bool) -> Result<SweepReport, CommandError> {
    let (config, pool) = connect().await?;
    let assets = AssetStore::new(&config.assets);
    tracing::info!(dir = %assets.dir().display(), dry_run, "Sweeping product images");

    let catalog = ProductCatalog::new(Arc::new(ProductRepository::new(pool)), assets);
    let min_age = Duration::from_secs(min_age_minutes.saturating_mul(60));
    let report = catalog.sweep_orphan_assets(min_age, dry_run).await?;

    for name in &report.orphans {
        tracing::info!(name = %name, "Orphaned image");
    }
    tracing::info!(
        scanned = report.scanned,
        orphans = report.orphans.len(),
        removed = report.removed,
        failed = report.failed,
        "Sweep complete"
    );
    Ok(report)
}
