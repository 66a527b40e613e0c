#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    portfolio_lib::run().await
}
