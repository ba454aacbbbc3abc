//! Subprocess invocation with a wall-clock budget.
//!
//! The prover spawns helper processes of its own, so termination has to
//! cover the whole process group: the child is put into a fresh group and
//! the group is signalled when the budget elapses. A guard ties group
//! termination to every exit path, timeout or not.

use std::io::Read;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::command::ProverInvocation;

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for the prover: {0}")]
    Wait(#[from] std::io::Error),
}

/// Raw result of one prover run, before classification.
#[derive(Debug)]
pub enum RawOutcome {
    /// Combined stdout and stderr of a run that finished in time.
    Completed(String),
    /// The budget elapsed; the process group was terminated.
    TimedOut,
}

/// Owns the spawned child and terminates its whole process group exactly
/// once, on drop at the latest.
struct GroupGuard {
    child: Child,
    done: bool,
}

impl GroupGuard {
    fn new(child: Child) -> Self {
        Self { child, done: false }
    }

    fn terminate(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        #[cfg(unix)]
        {
            // The child was spawned as its own group leader, so its pid
            // doubles as the group id.
            unsafe {
                libc::killpg(self.child.id() as libc::pid_t, libc::SIGTERM);
            }
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Drain a pipe on a helper thread so a chatty prover cannot fill the pipe
/// buffer and stall before we ever call wait.
fn drain<R: Read + Send + 'static>(pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut pipe = pipe;
        let mut buf = String::new();
        let _ = pipe.read_to_string(&mut buf);
        buf
    })
}

fn take_pipes(child: &mut Child) -> (Option<ChildStdout>, Option<ChildStderr>) {
    (child.stdout.take(), child.stderr.take())
}

/// Run one prover invocation to completion or until `timeout` elapses.
///
/// Output is captured off-process; stdout and stderr are joined with a
/// newline for classification, which only scans for markers.
pub fn run_prover(
    invocation: &ProverInvocation,
    timeout: Option<Duration>,
) -> Result<RawOutcome, InvokeError> {
    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    debug!(command = %invocation.display_line(), "spawning prover");
    let mut child = command.spawn().map_err(|source| InvokeError::Spawn {
        program: invocation.program.display().to_string(),
        source,
    })?;

    let (stdout, stderr) = take_pipes(&mut child);
    let stdout_reader = stdout.map(drain);
    let stderr_reader = stderr.map(drain);
    let mut guard = GroupGuard::new(child);

    let status = match timeout {
        Some(limit) => match guard.child.wait_timeout(limit)? {
            Some(status) => status,
            None => {
                warn!(?limit, "prover exceeded its budget, terminating process group");
                guard.terminate();
                // Readers see EOF once the group is gone; discard the
                // partial output.
                if let Some(reader) = stdout_reader {
                    let _ = reader.join();
                }
                if let Some(reader) = stderr_reader {
                    let _ = reader.join();
                }
                return Ok(RawOutcome::TimedOut);
            }
        },
        None => guard.child.wait()?,
    };
    guard.done = true;

    let stdout = stdout_reader
        .and_then(|reader| reader.join().ok())
        .unwrap_or_default();
    let stderr = stderr_reader
        .and_then(|reader| reader.join().ok())
        .unwrap_or_default();
    debug!(code = ?status.code(), "prover finished");

    Ok(RawOutcome::Completed(format!("{stdout}\n{stderr}")))
}
