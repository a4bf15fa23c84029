use std::io;

use crate::probe::CommandRunner;

const SYSTEM_PROFILER: &str = "system_profiler";
const DISPLAYS_DATA_TYPE: &str = "SPDisplaysDataType";

/// Answers "is this display attached?" from system_profiler output.
pub struct DisplayDetector<R> {
    runner: R,
}

impl<R: CommandRunner> DisplayDetector<R> {
    pub fn new(runner: R) -> Self {
        DisplayDetector { runner }
    }

    /// Substring match against the profiler dump. Output that does not
    /// mention the display, whatever its shape, reads as absent. Only a
    /// failure to run the profiler at all is an error.
    pub async fn is_present(&self, display_name: &str) -> io::Result<bool> {
        let output = self.runner.run(SYSTEM_PROFILER, &[DISPLAYS_DATA_TYPE]).await?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{SYSTEM_PROFILER} exited with {}",
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).contains(display_name))
    }
}
