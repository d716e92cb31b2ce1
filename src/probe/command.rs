//! Bounded external command execution.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::catalog::CommandSpec;

use super::ProbeOutcome;

/// How often a running probe is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of a command that ran to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited with status 0.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout, or stderr when stdout is blank.
    ///
    /// Returns `None` when both are blank.
    pub fn text(&self) -> Option<String> {
        [&self.stdout, &self.stderr]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(String::from)
    }
}

/// Why a command did not run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The program is not on PATH.
    NotFound,
    /// The command exceeded its timeout and was killed.
    TimedOut,
    /// The command could not be spawned or waited on.
    Spawn(String),
}

impl From<ExecError> for ProbeOutcome {
    fn from(err: ExecError) -> Self {
        match err {
            ExecError::NotFound => ProbeOutcome::NotFound,
            ExecError::TimedOut => ProbeOutcome::Timeout,
            ExecError::Spawn(details) => ProbeOutcome::Failed(details),
        }
    }
}

/// Bytes read from one pipe so far.
type PipeBuffer = Arc<Mutex<Vec<u8>>>;

/// Read a pipe to EOF on a background thread, signalling `done` at the end.
///
/// The buffer fills as data arrives, so a caller that stops waiting still
/// sees everything read up to that point.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>, done: Sender<()>) -> PipeBuffer {
    let buffer = PipeBuffer::default();
    let sink = Arc::clone(&buffer);
    thread::spawn(move || {
        if let Some(mut pipe) = pipe {
            let mut chunk = [0u8; 4096];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Ok(mut buf) = sink.lock() {
                            buf.extend_from_slice(&chunk[..n]);
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
        }
        let _ = done.send(());
    });
    buffer
}

fn captured(buffer: &PipeBuffer) -> String {
    buffer
        .lock()
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

/// Run a program with arguments, killing it once `timeout` elapses.
pub fn execute(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<CommandOutput, ExecError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExecError::NotFound,
            _ => ExecError::Spawn(format!("failed to start {}: {}", program, e)),
        })?;

    // Drain pipes concurrently with polling.
    let (done_tx, done_rx) = mpsc::channel();
    let stdout = spawn_reader(child.stdout.take(), done_tx.clone());
    let stderr = spawn_reader(child.stderr.take(), done_tx);

    let start = Instant::now();
    let deadline = start + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::debug!("{} timed out after {:?}", program, timeout);
                    return Err(ExecError::TimedOut);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                return Err(ExecError::Spawn(format!(
                    "failed to wait for {}: {}",
                    program, e
                )));
            }
        }
    };

    // A backgrounded grandchild can hold the pipes open after the child
    // exits. EOF is only awaited until the deadline.
    for _ in 0..2 {
        let remaining = deadline
            .saturating_duration_since(Instant::now())
            .max(POLL_INTERVAL);
        if done_rx.recv_timeout(remaining).is_err() {
            tracing::debug!(
                "{} left its output open past {:?}, using what was read",
                program,
                timeout
            );
            break;
        }
    }

    Ok(CommandOutput {
        exit_code: status.code(),
        success: status.success(),
        stdout: captured(&stdout),
        stderr: captured(&stderr),
    })
}

/// Run one probe command and classify the result.
pub fn run_command(spec: &CommandSpec, timeout: Duration) -> ProbeOutcome {
    match execute(&spec.program, &spec.args, timeout) {
        Ok(output) if spec.require_success && !output.success => ProbeOutcome::Failed(format!(
            "`{}` exited with code {:?}",
            spec.display(),
            output.exit_code
        )),
        Ok(output) => ProbeOutcome::Found {
            output: output.text(),
            version: None,
        },
        Err(err) => err.into(),
    }
}
