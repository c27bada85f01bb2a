use std::io;

use anyhow::Result;
use tracing::{info, warn};

use crate::core::driver::{self, Animation};
use crate::core::engine::Spinner;
use crate::core::options::SpinnerOptions;
use crate::core::repeat::RepeatController;

pub async fn run_spinner(options: SpinnerOptions, repeat: bool) -> Result<()> {
    if repeat {
        println!(
            "Running {} spinner {} times in a loop...\n",
            options.preset_name(),
            options.max_loops
        );

        let controller = RepeatController::from_options(&options, io::stdout())?;
        let controller = run_until_idle(controller).await?;
        info!(
            "Finished {} of {} runs",
            controller.completed_runs(),
            controller.max_runs()
        );
    } else {
        let spinner = Spinner::from_options(&options, io::stdout());
        run_until_idle(spinner).await?;
    }

    Ok(())
}

/// Drives `animation` to completion, stopping it early on Ctrl-C so the
/// cursor is restored.
async fn run_until_idle<A>(animation: A) -> Result<A>
where
    A: Animation + Send + 'static,
{
    let handle = driver::spawn(animation);
    let control = handle.control();

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping spinner");
            control.stop();
        }
    });

    let animation = handle.join().await?;
    interrupt.abort();

    Ok(animation)
}
