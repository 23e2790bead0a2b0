#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cjm_builder_server::start().await
}
