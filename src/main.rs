use anyhow::Context;
use courses_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load courses settings")?;
    courses_telemetry::init(&settings.telemetry);

    courses_app::run(settings).await
}
