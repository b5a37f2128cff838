//! The calculator engine.
//!
//! A keypad-driven state machine: every button press is one method call,
//! after which the caller re-reads [`Engine::expression`] and
//! [`Engine::display_value`]. Operators apply strictly left to right, one
//! at a time, with no precedence.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::CalcError;
use super::format::{format_number, operator_symbol};
use super::keys::Key;
use super::state::EngineState;

/// A binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator to a pair of operands.
    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

/// A trigonometric function key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sine,
    Cosine,
    Tangent,
}

/// How trig arguments are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// The other unit.
    pub fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Short label for a mode indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
        }
    }
}

/// Calculator state.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    /// Operand text being typed, not yet parsed.
    pending_input: String,
    /// Left operand, or the result carried forward from the last computation.
    accumulator: Option<f64>,
    /// Operator waiting for its right operand.
    pending_operator: Option<Operator>,
    last_result: Option<f64>,
    /// Set by equals; the next digit or dot starts over.
    just_evaluated: bool,
    angle_unit: AngleUnit,
}

impl Engine {
    /// Create an empty engine using the given angle unit.
    pub fn new(angle_unit: AngleUnit) -> Self {
        Self {
            angle_unit,
            ..Self::default()
        }
    }

    /// Current angle unit.
    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    /// Change the angle unit. Allowed at any point, including mid-entry.
    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
    }

    /// Switch between degrees and radians, returning the new unit.
    pub fn toggle_angle_unit(&mut self) -> AngleUnit {
        self.angle_unit = self.angle_unit.toggled();
        self.angle_unit
    }

    /// The operand text currently being typed.
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Operator waiting for its right operand, if any.
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Whether the last key was equals.
    pub fn just_evaluated(&self) -> bool {
        self.just_evaluated
    }

    /// Type a digit. Anything other than an ASCII digit is ignored.
    pub fn input_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if self.just_evaluated {
            self.all_clear();
        }
        if self.pending_input == "0" {
            self.pending_input.clear();
        }
        self.pending_input.push(c);
    }

    /// Type a decimal point. Only one is allowed per operand.
    pub fn input_dot(&mut self) {
        if self.just_evaluated {
            self.all_clear();
        }
        if self.pending_input.contains('.') {
            return;
        }
        if self.pending_input.is_empty() {
            self.pending_input.push_str("0.");
        } else {
            self.pending_input.push('.');
        }
    }

    /// Select the operator for the next operand.
    ///
    /// When an operator is already pending and a new operand has been typed,
    /// the pending operation is evaluated first, so `2 + 3 +` shows `5 +`.
    /// A failed evaluation leaves every field untouched.
    pub fn set_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        if self.pending_operator.is_some() && !self.pending_input.is_empty() {
            self.compute()?;
        } else if self.accumulator.is_none() && !self.pending_input.is_empty() {
            self.accumulator = self.parsed_input();
        } else if self.accumulator.is_none()
            && self.pending_input.is_empty()
            && let Some(result) = self.last_result
        {
            self.accumulator = Some(result);
        }

        self.pending_operator = Some(op);
        self.pending_input.clear();
        self.just_evaluated = false;
        trace!(?op, accumulator = ?self.accumulator, "operator set");
        Ok(())
    }

    /// Press equals.
    ///
    /// With no pending operator the result is just the current operand, so a
    /// bare `12 =` yields 12. Returns [`CalcError::DivisionByZero`] without
    /// changing any state when dividing by exactly zero.
    pub fn equals_press(&mut self) -> Result<(), CalcError> {
        self.compute()?;
        self.just_evaluated = true;
        Ok(())
    }

    /// Apply a trig function to the current operand.
    ///
    /// The result replaces the typed operand, so it can be edited or used as
    /// the right operand of a pending operator.
    pub fn apply_trig(&mut self, function: TrigFunction) {
        let value = if !self.pending_input.is_empty() {
            self.parsed_input().unwrap_or(0.0)
        } else {
            self.last_result.or(self.accumulator).unwrap_or(0.0)
        };

        let arg = match self.angle_unit {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        };
        let result = match function {
            TrigFunction::Sine => arg.sin(),
            TrigFunction::Cosine => arg.cos(),
            TrigFunction::Tangent => arg.tan(),
        };

        trace!(?function, value, result, "trig applied");
        self.pending_input = format_number(result);
        self.last_result = Some(result);
    }

    /// Reset everything except the angle unit.
    pub fn all_clear(&mut self) {
        *self = Self::new(self.angle_unit);
    }

    /// Remove the last typed character. Never touches a committed operand.
    pub fn delete_last(&mut self) {
        self.pending_input.pop();
    }

    /// Flip the sign of the typed operand.
    pub fn toggle_sign(&mut self) {
        if let Some(rest) = self.pending_input.strip_prefix('-') {
            self.pending_input = rest.to_string();
        } else if !self.pending_input.is_empty() {
            self.pending_input.insert(0, '-');
        }
    }

    /// Apply a single key press.
    pub fn press(&mut self, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Digit(c) => self.input_digit(c),
            Key::Dot => self.input_dot(),
            Key::Operator(op) => self.set_operator(op)?,
            Key::Equals => self.equals_press()?,
            Key::AllClear => self.all_clear(),
            Key::Delete => self.delete_last(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Trig(function) => self.apply_trig(function),
            Key::ToggleAngle => {
                self.toggle_angle_unit();
            }
        }
        Ok(())
    }

    /// The expression line, e.g. `12 + 3`.
    pub fn expression(&self) -> String {
        let lhs = self.accumulator.map(format_number).unwrap_or_default();
        let op = self
            .pending_operator
            .map(|op| format!(" {} ", operator_symbol(op)))
            .unwrap_or_default();
        format!("{}{}{}", lhs, op, self.pending_input)
            .trim()
            .to_string()
    }

    /// The main display value.
    pub fn display_value(&self) -> String {
        if !self.pending_input.is_empty() {
            self.pending_input.clone()
        } else if let Some(result) = self.last_result {
            format_number(result)
        } else if let Some(value) = self.accumulator {
            format_number(value)
        } else {
            "0".to_string()
        }
    }

    /// Capture the full state.
    pub fn snapshot(&self) -> EngineState {
        EngineState {
            pending_input: self.pending_input.clone(),
            accumulator: self.accumulator,
            pending_operator: self.pending_operator,
            last_result: self.last_result,
            just_evaluated: self.just_evaluated,
            angle_unit: self.angle_unit,
        }
    }

    /// Replace the full state with a previously captured one.
    pub fn restore(&mut self, state: EngineState) {
        let EngineState {
            pending_input,
            accumulator,
            pending_operator,
            last_result,
            just_evaluated,
            angle_unit,
        } = state;

        *self = Self {
            pending_input,
            accumulator,
            pending_operator,
            last_result,
            just_evaluated,
            angle_unit,
        };
    }

    fn parsed_input(&self) -> Option<f64> {
        self.pending_input.parse().ok()
    }

    /// Evaluate the pending operation. All fallible work happens before the
    /// first write.
    fn compute(&mut self) -> Result<(), CalcError> {
        let rhs = self
            .parsed_input()
            .or(self.accumulator)
            .or(self.last_result)
            .unwrap_or(0.0);
        let lhs = self.accumulator.or(self.last_result).unwrap_or(0.0);

        let result = match self.pending_operator {
            Some(op) => op.apply(lhs, rhs)?,
            None => rhs,
        };

        self.accumulator = Some(result);
        self.last_result = Some(result);
        self.pending_operator = None;
        self.pending_input.clear();
        Ok(())
    }
}

impl From<EngineState> for Engine {
    fn from(state: EngineState) -> Self {
        let mut engine = Self::default();
        engine.restore(state);
        engine
    }
}
