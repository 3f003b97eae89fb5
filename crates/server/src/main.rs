#[tokio::main]
async fn main() -> anyhow::Result<()> {
    licensescan_server::start().await
}
