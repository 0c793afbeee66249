#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mapquiz_server::run().await
}
