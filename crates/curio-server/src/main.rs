#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = curio_server::config::load_config()?;
    curio_server::run(config).await
}
