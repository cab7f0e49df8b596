//! HLDS process management.
//!
//! Spawns `hlds_run` with piped stdio, streams stdout lines from a
//! dedicated reader thread into the active output subscription, and relays
//! operator commands into stdin. Blocking work (spawn, port cleanup, pipe
//! writes) runs on the blocking pool so lifecycle calls only suspend the
//! caller.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;

use futures::future::{BoxFuture, FutureExt};

use crate::config::AppState;
use crate::error::{DispatchError, LifecycleError};
use crate::server::{OutputSink, OutputSubscription, ProcessManager, OUTPUT_CHANNEL_CAPACITY};

struct RunningChild {
    child: Child,
    reader: JoinHandle<()>,
    running: Arc<AtomicBool>,
}

pub struct HldsProcess {
    settings: Arc<RwLock<AppState>>,
    inner: Arc<Mutex<Option<RunningChild>>>,
    subscriber: Arc<Mutex<Option<OutputSink>>>,
}

impl HldsProcess {
    pub fn new(settings: Arc<RwLock<AppState>>) -> Self {
        HldsProcess {
            settings,
            inner: Arc::new(Mutex::new(None)),
            subscriber: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        let mut guard = self.inner.lock().expect("process state lock");
        match guard.as_mut() {
            Some(running) => !matches!(running.child.try_wait(), Ok(Some(_))),
            None => false,
        }
    }
}

fn start_blocking(
    settings: &Arc<RwLock<AppState>>,
    inner: &Arc<Mutex<Option<RunningChild>>>,
    subscriber: &Arc<Mutex<Option<OutputSink>>>,
) -> Result<(), LifecycleError> {
    let (install_path, config) = {
        let state = settings.read().expect("settings lock");
        let path = state
            .install_path
            .clone()
            .ok_or(LifecycleError::PathNotConfigured)?;
        (PathBuf::from(path), state.server.clone())
    };

    free_port(&config.port);
    // A stale child from a previous launch is replaced, not doubled.
    stop_blocking(inner).ok();

    let mut child = Command::new(install_path.join("hlds_run"))
        .current_dir(&install_path)
        .arg("-console")
        .arg("-game")
        .arg("cstrike")
        .arg("+port")
        .arg(&config.port)
        .arg("+map")
        .arg(&config.map)
        .arg("+maxplayers")
        .arg("32")
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| LifecycleError::StartFailed(e.to_string()))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| LifecycleError::StartFailed("stdout not available".to_string()))?;

    let running = Arc::new(AtomicBool::new(true));
    let running_reader = Arc::clone(&running);
    let subscriber_reader = Arc::clone(subscriber);

    let reader = std::thread::spawn(move || {
        let reader = BufReader::new(stdout);
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if !running_reader.load(Ordering::Relaxed) {
                break;
            }
            let sink = subscriber_reader.lock().expect("subscriber lock").clone();
            if let Some(sink) = sink {
                sink.deliver(line);
            }
        }
        log::debug!("Server stdout reader finished");
    });

    *inner.lock().expect("process state lock") = Some(RunningChild {
        child,
        reader,
        running,
    });

    log::info!(
        "Server process started from {} on port {}",
        install_path.display(),
        config.port
    );
    Ok(())
}

fn stop_blocking(inner: &Arc<Mutex<Option<RunningChild>>>) -> Result<(), LifecycleError> {
    let taken = inner.lock().expect("process state lock").take();
    if let Some(mut running) = taken {
        running.running.store(false, Ordering::Relaxed);
        running
            .child
            .kill()
            .map_err(|e| LifecycleError::StopFailed(e.to_string()))?;
        running
            .child
            .wait()
            .map_err(|e| LifecycleError::StopFailed(e.to_string()))?;
        // The reader unblocks once the pipe closes; don't hold the caller.
        std::thread::spawn(move || {
            let _ = running.reader.join();
        });
        log::info!("Server process stopped");
    }
    Ok(())
}

fn send_input_blocking(
    inner: &Arc<Mutex<Option<RunningChild>>>,
    line: &str,
) -> Result<(), DispatchError> {
    let mut guard = inner.lock().expect("process state lock");
    let running = guard.as_mut().ok_or(DispatchError::ProcessNotRunning)?;
    let stdin = running
        .child
        .stdin
        .as_mut()
        .ok_or(DispatchError::StdinUnavailable)?;
    stdin
        .write_all(format!("{}\n", line).as_bytes())
        .map_err(|e| DispatchError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Kill whatever is still bound to the server port from a previous run.
fn free_port(port: &str) {
    #[cfg(unix)]
    {
        let output = Command::new("lsof")
            .arg("-t")
            .arg(format!("-i:{}", port))
            .output();
        if let Ok(output) = output {
            if output.status.success() {
                let pids = String::from_utf8_lossy(&output.stdout);
                for pid in pids.lines() {
                    let _ = Command::new("kill").arg("-9").arg(pid).output();
                    log::info!("Freed port {}: killed process {}", port, pid);
                }
            }
        }
    }

    #[cfg(windows)]
    {
        let output = Command::new("netstat").args(["-ano"]).output();
        if let Ok(output) = output {
            let text = String::from_utf8_lossy(&output.stdout);
            for line in text.lines() {
                if line.contains(&format!(":{}", port)) {
                    if let Some(pid) = line.split_whitespace().last() {
                        let _ = Command::new("taskkill").args(["/F", "/PID", pid]).output();
                        log::info!("Freed port {}: killed process {}", port, pid);
                    }
                }
            }
        }
    }
}

impl ProcessManager for HldsProcess {
    fn start(&self) -> BoxFuture<'static, Result<(), LifecycleError>> {
        let settings = Arc::clone(&self.settings);
        let inner = Arc::clone(&self.inner);
        let subscriber = Arc::clone(&self.subscriber);
        async move {
            tokio::task::spawn_blocking(move || start_blocking(&settings, &inner, &subscriber))
                .await
                .map_err(|e| LifecycleError::StartFailed(e.to_string()))?
        }
        .boxed()
    }

    fn stop(&self) -> BoxFuture<'static, Result<(), LifecycleError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            tokio::task::spawn_blocking(move || stop_blocking(&inner))
                .await
                .map_err(|e| LifecycleError::StopFailed(e.to_string()))?
        }
        .boxed()
    }

    fn send_input(&self, line: String) -> BoxFuture<'static, Result<(), DispatchError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            tokio::task::spawn_blocking(move || send_input_blocking(&inner, &line))
                .await
                .map_err(|e| DispatchError::WriteFailed(e.to_string()))?
        }
        .boxed()
    }

    fn subscribe_output(&self) -> OutputSubscription {
        let (sink, subscription) = OutputSubscription::channel(OUTPUT_CHANNEL_CAPACITY);
        *self.subscriber.lock().expect("subscriber lock") = Some(sink);
        subscription
    }
}
