use owo_colors::OwoColorize;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::interval;

use crate::output::{self, OutputLevel};

/// Braille spinner drawn on stderr while a model call is in flight
pub struct Spinner {
    is_active: Arc<AtomicBool>,
    message: String,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        Self {
            is_active: Arc::new(AtomicBool::new(false)),
            message: message.to_string(),
        }
    }

    pub fn start(&self) {
        self.is_active.store(true, Ordering::Relaxed);
        let is_active = Arc::clone(&self.is_active);
        let message = self.message.clone();

        tokio::spawn(async move {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut ticker = interval(Duration::from_millis(80));
            let mut frame = 0;

            while is_active.load(Ordering::Relaxed) {
                ticker.tick().await;
                if !is_active.load(Ordering::Relaxed) {
                    break;
                }
                let mut stderr = io::stderr().lock();
                let _ = write!(
                    stderr,
                    "\r{} {} ",
                    message.blue().bold(),
                    frames[frame].cyan()
                );
                let _ = stderr.flush();
                frame = (frame + 1) % frames.len();
            }
        });
    }

    pub fn stop(&self) {
        if self.is_active.swap(false, Ordering::Relaxed) {
            let mut stderr = io::stderr().lock();
            let _ = write!(stderr, "\r\x1b[K");
            let _ = stderr.flush();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Await `task`, spinning only on an interactive stderr in normal output mode
pub async fn spin_while<F>(message: &str, output_level: OutputLevel, task: F) -> F::Output
where
    F: Future,
{
    if output_level != OutputLevel::Normal || !output::interactive() {
        return task.await;
    }

    let spinner = Spinner::new(message);
    spinner.start();
    let result = task.await;
    spinner.stop();
    result
}
