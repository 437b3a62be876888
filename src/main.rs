use anyhow::Result;
use volunteer_hub::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
