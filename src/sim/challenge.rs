//! Arithmetic challenge: the gate in front of every fireball
//!
//! One problem is active at a time. The player types digits into a short
//! buffer and submits; a correct answer casts, a wrong one clears the buffer.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::INPUT_MAX_DIGITS;

/// Base operand range before score scaling
pub const BASE_RANGE: u32 = 10;
/// Range growth per difficulty step
pub const RANGE_STEP: u32 = 5;
/// Score needed per difficulty step
pub const SCORE_PER_STEP: u64 = 500;
/// Smallest addition operand
pub const ADD_MIN: u32 = 5;
/// Smallest subtraction minuend (keeps a non-empty subtrahend range)
pub const SUB_MIN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
        }
    }
}

/// A single arithmetic problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub lhs: u32,
    pub op: Operator,
    pub rhs: u32,
    pub answer: u32,
    /// Operand range this problem was drawn with
    pub range: u32,
}

impl MathProblem {
    /// Build a problem from operands. Subtraction saturates at zero, which
    /// never happens for generated problems.
    pub fn new(lhs: u32, op: Operator, rhs: u32, range: u32) -> Self {
        let answer = match op {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs.saturating_sub(rhs),
        };
        Self {
            lhs,
            op,
            rhs,
            answer,
            range,
        }
    }

    /// HUD text, e.g. "12 - 7"
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Operand range for a score: grows by 5 every 500 points
pub fn difficulty_range(score: u64) -> u32 {
    let steps = u32::try_from(score / SCORE_PER_STEP).unwrap_or(u32::MAX);
    BASE_RANGE.saturating_add(steps.saturating_mul(RANGE_STEP))
}

/// Draw a fresh problem for the given score
pub fn random_problem<R: Rng>(score: u64, rng: &mut R) -> MathProblem {
    let range = difficulty_range(score);
    let op = if rng.random_bool(0.5) {
        Operator::Add
    } else {
        Operator::Sub
    };

    match op {
        Operator::Add => {
            let lhs = rng.random_range(ADD_MIN..ADD_MIN + range);
            let rhs = rng.random_range(ADD_MIN..ADD_MIN + range);
            MathProblem::new(lhs, op, rhs, range)
        }
        Operator::Sub => {
            let lhs = rng.random_range(SUB_MIN..SUB_MIN + range);
            // [1, lhs - 1] so the answer is always at least 1
            let rhs = rng.random_range(1..lhs);
            MathProblem::new(lhs, op, rhs, range)
        }
    }
}

/// Result of submitting the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// Active problem plus the player's typed answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathChallenge {
    problem: MathProblem,
    input: String,
    /// Outcome of the latest submission, cleared by the next keystroke.
    /// `None` means the challenge is waiting for input.
    last_outcome: Option<AnswerOutcome>,
}

impl MathChallenge {
    /// Start with a problem drawn for `score`
    pub fn new<R: Rng>(score: u64, rng: &mut R) -> Self {
        Self {
            problem: random_problem(score, rng),
            input: String::with_capacity(INPUT_MAX_DIGITS),
            last_outcome: None,
        }
    }

    /// Start with a known problem (scripted sessions, tests)
    pub fn with_problem(problem: MathProblem) -> Self {
        Self {
            problem,
            input: String::with_capacity(INPUT_MAX_DIGITS),
            last_outcome: None,
        }
    }

    pub fn problem(&self) -> &MathProblem {
        &self.problem
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_outcome(&self) -> Option<AnswerOutcome> {
        self.last_outcome
    }

    /// Replace the active problem and clear the buffer
    pub fn generate_problem<R: Rng>(&mut self, score: u64, rng: &mut R) -> &MathProblem {
        self.problem = random_problem(score, rng);
        self.input.clear();
        &self.problem
    }

    /// Swap in a specific problem and clear the buffer
    pub fn set_problem(&mut self, problem: MathProblem) {
        self.problem = problem;
        self.input.clear();
    }

    /// Append a digit; ignored once the buffer is full or for non-digits
    pub fn append_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        self.last_outcome = None;
        if self.input.len() < INPUT_MAX_DIGITS {
            self.input.push(digit);
        }
    }

    pub fn backspace(&mut self) {
        self.last_outcome = None;
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.last_outcome = None;
    }

    /// Check the buffer against the answer. A wrong answer clears the buffer;
    /// on a correct one the caller casts and draws the next problem.
    pub fn submit(&mut self) -> AnswerOutcome {
        let outcome = match self.input.parse::<u32>() {
            Ok(value) if value == self.problem.answer => AnswerOutcome::Correct,
            _ => AnswerOutcome::Incorrect,
        };
        if outcome == AnswerOutcome::Incorrect {
            self.input.clear();
        }
        self.last_outcome = Some(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn twelve_minus_seven() -> MathChallenge {
        MathChallenge::with_problem(MathProblem::new(12, Operator::Sub, 7, 10))
    }

    #[test]
    fn test_problem_text() {
        let p = MathProblem::new(12, Operator::Sub, 7, 10);
        assert_eq!(p.text(), "12 - 7");
        assert_eq!(p.answer, 5);
        assert_eq!(MathProblem::new(5, Operator::Add, 9, 10).text(), "5 + 9");
    }

    #[test]
    fn test_difficulty_range_steps() {
        assert_eq!(difficulty_range(0), 10);
        assert_eq!(difficulty_range(499), 10);
        assert_eq!(difficulty_range(500), 15);
        assert_eq!(difficulty_range(1200), 20);
    }

    #[test]
    fn test_correct_submit() {
        let mut c = twelve_minus_seven();
        c.append_digit('5');
        assert_eq!(c.submit(), AnswerOutcome::Correct);
        assert_eq!(c.last_outcome(), Some(AnswerOutcome::Correct));
    }

    #[test]
    fn test_wrong_submit_clears_and_keeps_problem() {
        let mut c = twelve_minus_seven();
        c.append_digit('4');
        c.append_digit('2');
        assert_eq!(c.submit(), AnswerOutcome::Incorrect);
        assert_eq!(c.input(), "");
        assert_eq!(c.problem().text(), "12 - 7");
        assert_eq!(c.last_outcome(), Some(AnswerOutcome::Incorrect));

        // Typing again drops the stale outcome
        c.append_digit('1');
        assert_eq!(c.last_outcome(), None);
    }

    #[test]
    fn test_empty_submit_is_incorrect() {
        let mut c = twelve_minus_seven();
        assert_eq!(c.submit(), AnswerOutcome::Incorrect);
    }

    #[test]
    fn test_leading_zero_still_parses() {
        let mut c = twelve_minus_seven();
        c.append_digit('0');
        c.append_digit('5');
        assert_eq!(c.submit(), AnswerOutcome::Correct);
    }

    #[test]
    fn test_input_truncates_at_four() {
        let mut c = twelve_minus_seven();
        for d in "1234567".chars() {
            c.append_digit(d);
        }
        assert_eq!(c.input(), "1234");
    }

    #[test]
    fn test_non_digit_ignored() {
        let mut c = twelve_minus_seven();
        c.append_digit('x');
        c.append_digit('-');
        assert_eq!(c.input(), "");
    }

    #[test]
    fn test_backspace() {
        let mut c = twelve_minus_seven();
        c.backspace();
        assert_eq!(c.input(), "");
        c.append_digit('1');
        c.append_digit('2');
        c.backspace();
        assert_eq!(c.input(), "1");
    }

    #[test]
    fn test_generate_resets_buffer() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut c = MathChallenge::new(0, &mut rng);
        c.append_digit('9');
        c.generate_problem(0, &mut rng);
        assert_eq!(c.input(), "");
    }

    proptest! {
        #[test]
        fn prop_operands_within_range(seed in any::<u64>(), score in 0u64..20_000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let range = difficulty_range(score);
            for _ in 0..16 {
                let p = random_problem(score, &mut rng);
                prop_assert_eq!(p.range, range);
                match p.op {
                    Operator::Add => {
                        prop_assert!(p.lhs >= ADD_MIN && p.lhs < ADD_MIN + range);
                        prop_assert!(p.rhs >= ADD_MIN && p.rhs < ADD_MIN + range);
                        prop_assert_eq!(p.answer, p.lhs + p.rhs);
                    }
                    Operator::Sub => {
                        prop_assert!(p.lhs >= SUB_MIN && p.lhs < SUB_MIN + range);
                        prop_assert!(p.rhs >= 1 && p.rhs < p.lhs);
                        prop_assert!(p.answer > 0);
                        prop_assert_eq!(p.answer, p.lhs - p.rhs);
                    }
                }
            }
        }

        #[test]
        fn prop_range_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(difficulty_range(lo) <= difficulty_range(hi));
        }

        #[test]
        fn prop_buffer_never_exceeds_max(digits in "[0-9]{0,20}") {
            let mut c = twelve_minus_seven();
            for d in digits.chars() {
                c.append_digit(d);
                prop_assert!(c.input().len() <= INPUT_MAX_DIGITS);
            }
        }

        #[test]
        fn prop_wrong_answer_never_matches(value in 0u32..10_000) {
            prop_assume!(value != 5);
            let mut c = twelve_minus_seven();
            for d in value.to_string().chars() {
                c.append_digit(d);
            }
            prop_assert_eq!(c.submit(), AnswerOutcome::Incorrect);
            prop_assert_eq!(c.input(), "");
            prop_assert_eq!(c.problem().answer, 5);
        }
    }
}
