mod bootstrap;

use anyhow::Result;
use consolidator_core::settings::Settings;
use consolidator_data::pipeline;

fn main() -> Result<()> {
    let settings = Settings::load()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("RFQ Consolidator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Output: {}, Sheet: {}",
        settings.input_dir.display(),
        settings.output.display(),
        settings.sheet
    );

    bootstrap::ensure_output_dir(&settings.output)?;

    match pipeline::run(&settings) {
        Ok(summary) => {
            println!(
                "Consolidated {} row(s) from {} file(s) into {} in {:.2}s",
                summary.total_rows,
                summary.processed_files,
                summary.output_path.display(),
                summary.duration.as_secs_f64()
            );
            if !summary.skipped.is_empty() {
                println!("Skipped {} file(s)", summary.skipped.len());
            }
            Ok(())
        }
        Err(err) if err.is_global() => {
            // Nothing to consolidate is an outcome, not a crash.
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
