use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    cli::run_cli(migration::Migrator).await;
}
