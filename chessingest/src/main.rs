#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chessingest::run_cli().await
}
