//! Database migration tool. Reads DATABASE_URL and dispatches the standard
//! sea-orm-migration subcommands (up, down, fresh, status, ...).

use migration::Migrator;

#[tokio::main]
async fn main() {
    sea_orm_migration::cli::run_cli(Migrator).await;
}
