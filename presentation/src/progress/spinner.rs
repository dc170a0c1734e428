//! Spinner shown while a one-shot query is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// "Fetching data..." spinner on stderr
pub struct FetchSpinner {
    bar: ProgressBar,
}

impl FetchSpinner {
    /// Start spinning; a hidden spinner draws nothing (`--quiet`, JSON output).
    pub fn start(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message("Fetching data...");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Remove the spinner line
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner() {
        let spinner = FetchSpinner::start(false);
        assert!(spinner.is_hidden());
        spinner.finish();
    }
}
