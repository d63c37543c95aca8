use rental_store::{cli, db::RentalStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rental_store=info")),
        )
        .init();

    let store = RentalStore::from_env();

    if let Err(e) = cli::handle_cli(&store).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
