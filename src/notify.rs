//! Player-facing notifications ("New high score!" toasts).

pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Any `FnMut(&str)` can act as a notifier.
impl<F: FnMut(&str)> Notifier for F {
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Sends notifications to the tracing log only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        tracing::info!(target: "flappy_cannon::notify", "{message}");
    }
}

pub fn new_high_score_message(score: u32) -> String {
    format!("New High Score! Amazing! You scored {score} points!")
}
