use storefront::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    storefront::init_tracing();

    let config = AppConfig::load("dev")?;
    storefront::run(config).await
}
