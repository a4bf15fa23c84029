use std::io;

use log::{error, info, warn};

use crate::probe::CommandRunner;

/// Where Homebrew installs blueutil on Apple Silicon.
pub const BLUEUTIL_PATH: &str = "/opt/homebrew/bin/blueutil";

/// Drives connection state of paired accessories through blueutil.
///
/// `connect` and `disconnect` are ensure-state operations: the loop calls
/// them for every device on every tick, so they query first and only act
/// when the device is in the wrong state.
pub struct BluetoothController<R> {
    runner: R,
}

impl<R: CommandRunner> BluetoothController<R> {
    pub fn new(runner: R) -> Self {
        BluetoothController { runner }
    }

    /// Connected iff the query prints exactly `1`. Any other output, a
    /// nonzero exit, or a failed invocation all count as not connected.
    pub async fn is_connected(&self, device: &str) -> bool {
        match self
            .runner
            .run(BLUEUTIL_PATH, &["--is-connected", device])
            .await
        {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "1",
            Err(err) => {
                warn!("Error querying {device}: {err}");
                false
            }
        }
    }

    pub async fn connect(&self, device: &str) {
        if self.is_connected(device).await {
            return;
        }
        info!("Connecting to {device}");
        if let Err(err) = self.invoke("--connect", device).await {
            error!("Error connecting to {device}: {err}");
        }
    }

    pub async fn disconnect(&self, device: &str) {
        if !self.is_connected(device).await {
            return;
        }
        info!("Disconnecting from {device}");
        if let Err(err) = self.invoke("--disconnect", device).await {
            error!("Error disconnecting from {device}: {err}");
        }
    }

    async fn invoke(&self, mode: &str, device: &str) -> io::Result<()> {
        let output = self.runner.run(BLUEUTIL_PATH, &[mode, device]).await?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "blueutil exited with {}",
                output.status
            )));
        }
        Ok(())
    }
}
