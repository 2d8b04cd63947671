use std::sync::Arc;

use tracing::Level;
use tramos_api::infra::{config::Config, logging};
use tramos_api::{normalize_province, BoundaryLoader, PgTrafficStore, TramoService};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--province <name>]\n\
         \n\
         Reads env vars (or .env):\n\
           DATABASE_URL or PGHOST/PGPORT/PGDATABASE/PGUSER/PGPASSWORD/PGSSLMODE\n\
           GEOJSON_DIR (default: ./public/nuevos_geojson)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let province = match args.iter().position(|a| a == "--province") {
        Some(i) => match args.get(i + 1) {
            Some(p) => Some(p.clone()),
            None => usage_and_exit(),
        },
        None => None,
    };

    let config = Config::from_env()?;
    logging::init(Level::WARN);

    println!("> Preflight:");
    println!("  store={}", config.database.redacted());
    println!("  listen={}", config.bind_addr);
    println!("  GEOJSON_DIR={}", config.geojson_dir.display());
    println!("  cors={:?}", config.cors);

    // Boundary directory
    let mut entries = tokio::fs::read_dir(&config.geojson_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", config.geojson_dir.display(), e))?;
    let mut boundary_files = 0usize;
    while let Some(entry) = entries.next_entry().await? {
        if entry.path().extension().is_some_and(|ext| ext == "geojson") {
            boundary_files += 1;
        }
    }
    println!("  Boundary files: {}", boundary_files);
    if boundary_files == 0 {
        eprintln!("  Warning: no .geojson files found; every province lookup will fail.");
    }

    // Store connectivity + dates query
    let store = PgTrafficStore::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to the traffic store: {}", e))?;
    let service = TramoService::new(Arc::new(store), BoundaryLoader::new(config.geojson_dir.clone()));
    let dates = service.list_distinct_dates().await?;
    match dates.first() {
        Some(newest) => println!("  Distinct dates: {} (newest {})", dates.len(), newest),
        None => eprintln!("  Warning: the traffic table has no rows."),
    }

    if let Some(name) = province {
        let key = normalize_province(&name);
        println!("  Province '{}' -> key '{}'", name, key);
        let segments = service.province_segments(&name).await?;
        println!("  Segments in {}: {}", service.boundaries().path_for(&key).display(), segments.len());
    }

    println!("> Preflight OK.");
    Ok(())
}
