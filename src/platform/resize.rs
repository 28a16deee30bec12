//! Terminal resize source (SIGWINCH) and window size probe.

use std::io;
use std::os::fd::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use signal_hook::iterator::{Handle, Signals};
use tracing::debug;

/// Latches SIGWINCH deliveries until the host takes them.
///
/// The listener thread is stopped and joined on drop.
pub struct ResizeSignal {
    pending: Arc<AtomicBool>,
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl ResizeSignal {
    pub fn install() -> io::Result<Self> {
        let mut signals = Signals::new([libc::SIGWINCH])?;
        let handle = signals.handle();
        let pending = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pending);

        let thread = thread::spawn(move || {
            for _ in signals.forever() {
                flag.store(true, Ordering::SeqCst);
            }
        });

        Ok(Self {
            pending,
            handle,
            thread: Some(thread),
        })
    }

    /// Whether at least one resize arrived since the last call.
    pub fn take_pending(&self) -> bool {
        let pending = self.pending.swap(false, Ordering::SeqCst);
        if pending {
            debug!("terminal resized");
        }
        pending
    }
}

impl Drop for ResizeSignal {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// `(columns, rows)` of the terminal behind `fd`, if it is one.
pub fn terminal_size(fd: RawFd) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}
