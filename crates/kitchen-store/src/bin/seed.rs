//! Writes the fixture dataset to a snapshot file.
//!
//! ```bash
//! cargo run --bin seed -- [path]    # default: ./kitchenhub.json
//! ```

use kitchen_store::{fixtures, JsonSnapshotStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "kitchenhub.json".to_string());

    let store = fixtures::seed_store();
    let snapshot = JsonSnapshotStore::new(&path);
    snapshot.save(&store).await?;

    println!(
        "Seeded {} products, {} batches, {} branches -> {path}",
        store.products.len(),
        store.inventory.len(),
        store.branches.len(),
    );
    Ok(())
}
