use std::io;
use std::process::Output;

use tokio::process::Command;

/// Seam between the reconciliation logic and the external utilities it
/// drives. The real implementation spawns a process; tests script the
/// outputs instead.
pub trait CommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<Output>;
}

impl<T: CommandRunner> CommandRunner for &T {
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<Output> {
        (**self).run(program, args).await
    }
}

/// Invokes the program on the host, capturing stdout and stderr.
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<Output> {
        Command::new(program).args(args).output().await
    }
}
