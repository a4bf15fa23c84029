use std::time::SystemTime;

use anyhow::Context as _;
use log::info;
use tokio::sync::watch;

use crate::bluetooth::BluetoothController;
use crate::config::{Config, ConfigStore};
use crate::display::DisplayDetector;
use crate::probe::CommandRunner;

/// Owns everything one reconciliation pass needs: the config store with
/// its staleness token, plus the two utility wrappers.
pub struct Switcher<R> {
    store: ConfigStore,
    config: Config,
    last_modified: SystemTime,
    bluetooth: BluetoothController<R>,
    display: DisplayDetector<R>,
}

impl<R: CommandRunner + Clone> Switcher<R> {
    pub fn new(store: ConfigStore, runner: R) -> anyhow::Result<Self> {
        let config = store.load().context("loading configuration")?;
        let last_modified = store
            .modified()
            .context("reading config file modification time")?;

        Ok(Switcher {
            bluetooth: BluetoothController::new(runner.clone()),
            display: DisplayDetector::new(runner),
            store,
            config,
            last_modified,
        })
    }

    /// One reconciliation pass: reload the config if the file changed,
    /// then drive every device toward the state implied by display
    /// presence. A config or display-query failure propagates and takes
    /// the process down; per-device failures are handled by the
    /// controller and retried on the next tick.
    pub async fn tick(&mut self) -> anyhow::Result<()> {
        if self
            .store
            .has_changed(self.last_modified)
            .context("checking config file for changes")?
        {
            self.config = self.store.load().context("reloading configuration")?;
            self.last_modified = self
                .store
                .modified()
                .context("reading config file modification time")?;
        }

        let present = self
            .display
            .is_present(&self.config.display_name)
            .await
            .context("querying connected displays")?;

        if present {
            info!("{} is connected", self.config.display_name);
            for device in &self.config.devices {
                self.bluetooth.connect(device).await;
            }
        } else {
            info!("{} is not connected", self.config.display_name);
            for device in &self.config.devices {
                self.bluetooth.disconnect(device).await;
            }
        }

        Ok(())
    }

    /// Loops until the shutdown channel flips. Shutdown is honored at the
    /// sleep point only; an in-flight tick always runs to completion.
    pub async fn run_loop(mut self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        loop {
            self.tick().await?;

            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Shutdown requested");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }
}
