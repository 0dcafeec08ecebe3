use product_catalog::domain::catalog::{format_brl, format_created_date};
use product_catalog::infra::config::{Backend, CatalogConfig};
use product_catalog::{CatalogService, CatalogView, ViewStatus};
use tracing_subscriber::EnvFilter;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--local] [--sort <field-direction>]\n\
         \n\
         Reads env vars (all optional):\n\
           CATALOG_BACKEND, CATALOG_API_URL, CATALOG_HTTP_TIMEOUT_SECS,\n\
           CATALOG_STORE_DIR, CATALOG_PAGE_SIZE\n\
         \n\
         --local forces the local fallback store regardless of CATALOG_BACKEND.\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let mut config = CatalogConfig::from_env()?;
    if args.iter().any(|a| a == "--local") {
        config.backend = Backend::Local;
    }
    let sort = match args.iter().position(|a| a == "--sort") {
        Some(i) => match args.get(i + 1) {
            Some(raw) => Some(raw.parse()?),
            None => usage_and_exit(),
        },
        None => None,
    };

    println!("> Preflight:");
    println!("  CATALOG_BACKEND={}", config.backend);
    match config.backend {
        Backend::Remote => {
            println!("  CATALOG_API_URL={}", config.api_url);
            println!("  CATALOG_HTTP_TIMEOUT_SECS={}", config.http_timeout.as_secs());
        }
        Backend::Local => println!("  CATALOG_STORE_DIR={}", config.store_dir.display()),
    }
    println!("  CATALOG_PAGE_SIZE={}", config.page_size);

    let service = CatalogService::from_config(&config)?;
    let mut view = CatalogView::new(config.page_size);
    service.load(&mut view).await;
    if let Some(sort) = sort {
        view.set_sort(sort);
    }

    match view.status() {
        ViewStatus::Failed(msg) => return Err(anyhow::anyhow!("Catalog did not load: {}", msg)),
        ViewStatus::Empty => println!("  Catalog is empty."),
        _ => {}
    }

    let page = view.page();
    println!(
        "  {} products across {} pages (sorted by {})",
        page.total_items,
        page.total_pages,
        view.filter().sort
    );
    for product in &page.items {
        println!(
            "  - [{}] {} | {} | {} | {}",
            product.id,
            product.name,
            product.category,
            format_brl(product.price),
            format_created_date(&product.created_at).unwrap_or_else(|| "-".to_string())
        );
    }

    println!("> Preflight OK.");
    Ok(())
}
