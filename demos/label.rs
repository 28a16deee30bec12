//! Renders a middle-truncated label that follows terminal resizes.
//!
//! Usage: `cargo run --example label -- "some/very/long/path/to/a/file.rs"`

#[cfg(unix)]
use std::env;
use std::io;
#[cfg(unix)]
use std::io::Write;
#[cfg(unix)]
use std::thread;
#[cfg(unix)]
use std::time::Duration;

#[cfg(unix)]
use truncate_middle::{
    logging, terminal_size, Anchor, Component, EnvConfig, ResizeSignal, TruncateMiddle,
    TruncateProps,
};

#[cfg(not(unix))]
fn main() -> io::Result<()> {
    eprintln!("the label demo needs a unix terminal");
    Ok(())
}

#[cfg(unix)]
fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    logging::init(&config)?;

    let text = env::args()
        .nth(1)
        .unwrap_or_else(|| "/usr/local/share/applications/some-rather-long-name.desktop".into());
    let end = Anchor::pattern(r"[^/]+$").map_err(|err| io::Error::other(err.to_string()))?;
    let props = TruncateProps::new(text).end(end).with_env(&config);

    let mut label = TruncateMiddle::new(props).with_padding(1, 0);
    let resize = ResizeSignal::install()?;
    let stdout_fd = libc::STDOUT_FILENO;
    let mut columns = terminal_size(stdout_fd).map(|(cols, _)| cols as usize).unwrap_or(80);

    let mut stdout = io::stdout();
    let mut last = String::new();
    for _ in 0..600 {
        if resize.take_pending() {
            if let Some((cols, rows)) = terminal_size(stdout_fd) {
                columns = cols as usize;
                label.set_viewport_size(columns, rows as usize);
            }
        }

        let line = label.render(columns).join("\n");
        if line != last {
            write!(stdout, "\r\x1b[2K{line}")?;
            stdout.flush()?;
            last = line;
        }
        thread::sleep(Duration::from_millis(50));
    }
    writeln!(stdout)?;
    Ok(())
}
