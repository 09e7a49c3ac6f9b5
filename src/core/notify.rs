use std::sync::Arc;

use crossterm::style::Stylize;

/// Fire-and-forget channel for short transient messages (toasts).
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Prints notifications to stderr; used by the headless `submit` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }
}
