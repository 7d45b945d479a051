/*
 * Responsibility
 * - tokio runtime entry point
 * - calls app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tenant_context::app::run().await
}
