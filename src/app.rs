//! The calculator as the front end sees it.
//!
//! Wraps an [`Engine`] with the behaviour that sits around the keypad:
//! recording finished calculations in the history and turning engine
//! errors into short user-facing notices.

use tracing::{debug, warn};

use crate::calculator::{CalcError, Engine, Key};
use crate::history::{HistoryItem, HistoryStore};

/// What the front end should show after a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// The display changed; re-read expression and value.
    Updated,
    /// The key was rejected. Show the message briefly; the display is as it
    /// was before the key.
    Notice(String),
}

/// An engine plus the optional history it records into.
pub struct Calculator {
    engine: Engine,
    history: Option<HistoryStore>,
}

impl Calculator {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            history: None,
        }
    }

    /// Record each successful equals press in `history`.
    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = Some(history);
        self
    }

    /// The underlying engine, for mode indicators and snapshots.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn expression(&self) -> String {
        self.engine.expression()
    }

    pub fn display_value(&self) -> String {
        self.engine.display_value()
    }

    /// Apply one key press.
    pub fn press(&mut self, key: Key) -> Feedback {
        // The expression has to be captured before equals replaces it
        let expression = (key == Key::Equals).then(|| self.engine.expression());

        if let Err(e) = self.engine.press(key) {
            debug!(?key, error = %e, "key rejected");
            return Feedback::Notice(e.to_string());
        }

        if let Some(expression) = expression {
            self.record(expression);
        }
        Feedback::Updated
    }

    /// Apply a sequence of key presses, collecting any notices.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> Vec<String> {
        keys.into_iter()
            .filter_map(|key| match self.press(key) {
                Feedback::Updated => None,
                Feedback::Notice(message) => Some(message),
            })
            .collect()
    }

    /// Parse and apply a line of key tokens.
    ///
    /// A line with an unknown token is rejected as a whole before any key is
    /// applied.
    pub fn press_line(&mut self, line: &str) -> Result<Vec<String>, CalcError> {
        let keys = crate::calculator::parse_keys(line)?;
        Ok(self.press_all(keys))
    }

    fn record(&self, expression: String) {
        let Some(history) = &self.history else {
            return;
        };
        if expression.trim().is_empty() {
            return;
        }

        let item = HistoryItem::new(expression, self.engine.display_value());
        if let Err(e) = history.add(item) {
            warn!(error = %e, "failed to record history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{AngleUnit, Operator};

    fn calculator_with_history(dir: &tempfile::TempDir) -> Calculator {
        Calculator::new(Engine::default()).with_history(HistoryStore::in_dir(dir.path()))
    }

    #[test]
    fn test_equals_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut calc = calculator_with_history(&dir);

        assert!(calc.press_line("12 + 3 =").unwrap().is_empty());
        assert_eq!(calc.display_value(), "15");

        let items = HistoryStore::in_dir(dir.path()).get().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].expression, "12 + 3");
        assert_eq!(items[0].result, "15");
    }

    #[test]
    fn test_division_by_zero_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut calc = calculator_with_history(&dir);

        let notices = calc.press_line("5 / 0 =").unwrap();
        assert_eq!(notices, vec!["Cannot divide by zero".to_string()]);
        assert_eq!(calc.display_value(), "0");
        assert_eq!(calc.expression(), "5 ÷ 0");
        assert!(HistoryStore::in_dir(dir.path()).get().unwrap().is_empty());
    }

    #[test]
    fn test_blank_expression_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut calc = calculator_with_history(&dir);

        assert_eq!(calc.press(Key::Equals), Feedback::Updated);
        assert_eq!(calc.display_value(), "0");
        assert!(HistoryStore::in_dir(dir.path()).get().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_token_rejects_line() {
        let mut calc = Calculator::new(Engine::default());
        assert!(calc.press_line("1 + 2 ^ 3").is_err());
        assert_eq!(calc.display_value(), "0");
    }

    #[test]
    fn test_without_history() {
        let mut calc = Calculator::new(Engine::new(AngleUnit::Degrees));
        calc.press_all([
            Key::Digit('9'),
            Key::Digit('0'),
            Key::Trig(crate::calculator::TrigFunction::Sine),
            Key::Operator(Operator::Multiply),
            Key::Digit('4'),
            Key::Equals,
        ]);
        assert_eq!(calc.display_value(), "4");
    }
}
