//! Courses service library
//!
//! Wires the course catalogue module into the kernel registry and the HTTP
//! server.

pub mod modules;

pub use modules::*;

use anyhow::Context;
use courses_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Register and initialize every module.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);

    let ctx = InitCtx { settings };
    registry
        .init_all(&ctx)
        .await
        .context("failed to initialize modules")?;

    Ok(registry)
}

/// Run the service until a shutdown signal arrives, then stop every module.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        addr = %settings.server.bind_addr(),
        "courses-app bootstrap starting"
    );

    let registry = bootstrap(&settings).await?;
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.start_all(&ctx).await?;

    tracing::info!("courses-app bootstrap complete");

    let served = courses_http::start_server(&registry, &settings).await;
    registry.stop_all().await?;
    served
}
