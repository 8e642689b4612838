//! Progress bar display for vendor copies

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for copying package files
pub struct CopyProgress {
    file_pb: ProgressBar,
}

impl CopyProgress {
    /// Create a progress bar for `total_files` files, or a hidden one
    pub fn new(total_files: u64, visible: bool) -> Self {
        if !visible {
            return Self {
                file_pb: ProgressBar::hidden(),
            };
        }

        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(style);
        Self { file_pb }
    }

    /// Show the file being copied
    pub fn update_file(&self, file_path: &str) {
        // Keep long paths on one line
        let display_path = if file_path.chars().count() > 50 {
            let tail: String = file_path
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            file_path.to_string()
        };
        self.file_pb.set_message(display_path);
        self.file_pb.inc(1);
    }

    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.file_pb.abandon();
    }
}
