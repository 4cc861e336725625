//! User-facing notifications for submissions

use tracing::{error, info};

/// Reports the result of a state-changing call to the user
pub trait Notifier: Send + Sync {
    /// A transaction went through; `link` points at it on the explorer
    fn report_success(&self, message: &str, link: &str);

    /// Something the user asked for did not happen
    fn report_failure(&self, message: &str);

    /// Neutral hint, e.g. that a wallet has to be connected first
    fn report_notice(&self, message: &str);
}

/// Prints notifications to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn report_success(&self, message: &str, link: &str) {
        info!(link, "{}", message);
        println!("✔ {}\n  {}", message, link);
    }

    fn report_failure(&self, message: &str) {
        error!("{}", message);
        eprintln!("✘ {}", message);
    }

    fn report_notice(&self, message: &str) {
        info!("{}", message);
        println!("• {}", message);
    }
}
