//! Progress bar for the receipt scan. Consumes the scanner's percent
//! channel and renders with indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

/// Bar for a 0-100 percent scan.
pub fn scan_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("  Scanning receipt [{bar:30.green/white}] {pos:>3}%")
            .expect("valid progress template")
            .progress_chars("=> "),
    );
    pb
}

/// Drive `pb` from the scanner's progress channel until the sender closes.
pub async fn drive(pb: &ProgressBar, mut rx: mpsc::Receiver<u8>) {
    while let Some(pct) = rx.recv().await {
        pb.set_position(u64::from(pct));
    }
    pb.finish_and_clear();
}
