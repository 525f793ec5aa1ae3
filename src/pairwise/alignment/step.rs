use std::borrow::Borrow;
use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use eyre::Result;

use crate::num::PrimUInt;

use super::op::Op;

/// An alignment step, i.e. a run of identical operations
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Step<Len: PrimUInt> {
    /// The length of the operation, e.g. the number of consequent matches or gaps.
    /// Guaranteed to be greater than zero.
    len: Len,
    /// The alignment operation
    op: Op,
}

impl<Len: PrimUInt> Step<Len> {
    pub fn new(op: Op, len: Len) -> Result<Self> {
        if len.is_zero() {
            return Err(eyre::eyre!("Step length must be greater than zero"));
        }
        Ok(Self { len, op })
    }

    /// Optimize the sequence of steps by collapsing identical operations to minimize the memory usage.
    /// If the sum of the lengths exceeds the maximum value of the step size, the step is divided accordingly.
    pub fn collapse(steps: &mut Vec<Step<Len>>) {
        if steps.is_empty() || steps.len() == 1 {
            return;
        }

        let (mut writep, mut readp) = (0, 1);

        while readp < steps.len() {
            if steps[writep].op == steps[readp].op {
                // If the sum of the lengths exceeds the maximum value of the step size, split the step
                match steps[writep].len.checked_add(&steps[readp].len) {
                    Some(x) => steps[writep].len = x,
                    None => {
                        steps[readp].len =
                            steps[readp].len - (Len::max_value() - steps[writep].len);
                        debug_assert!(steps[readp].len > Len::zero());
                        steps[writep].len = Len::max_value();

                        writep += 1;
                        steps[writep] = steps[readp];
                    }
                }
            } else {
                writep += 1;
                steps[writep] = steps[readp];
            }
            readp += 1;
        }
        steps.truncate(writep + 1);
    }

    pub fn rle_string(steps: impl Iterator<Item: Borrow<Step<Len>>>) -> String
    where
        Len: Display,
    {
        // 2 symbols is an average length of a step
        // 1 is the length of the symbol
        let hint = match steps.size_hint() {
            (_, Some(upper)) => upper * 3,
            (lower, _) => lower * 3,
        };

        let mut result = String::with_capacity(hint);
        for step in steps {
            let step = step.borrow();
            result.push_str(&step.len().to_string());
            result.push(step.op().symbol());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_steps<L: PrimUInt>(steps: &[(Op, L)]) -> Vec<Step<L>> {
        steps
            .iter()
            .map(|(op, len)| Step::new(*op, *len).unwrap())
            .collect()
    }

    #[test]
    fn test_zero_length_step() {
        assert!(Step::<u8>::new(Op::Match, 0).is_err());
        assert!(Step::<u8>::new(Op::Match, 1).is_ok());
    }

    #[test]
    fn test_step_optimize() {
        let mut steps = to_steps::<u8>(&[
            (Op::Match, 10),
            (Op::Match, 20),
            (Op::Match, 30),
            (Op::Match, 40),
            (Op::Match, 50),
            (Op::GapFirst, 200),
            (Op::GapFirst, 100),
            (Op::Match, 15),
            (Op::Match, 15),
            (Op::Match, 15),
        ]);

        Step::collapse(&mut steps);
        let expected = to_steps::<u8>(&[
            (Op::Match, 150),
            (Op::GapFirst, 255),
            (Op::GapFirst, 45),
            (Op::Match, 45),
        ]);

        assert_eq!(steps, expected);
    }

    #[test]
    fn test_rle_string() {
        // Empty input -> empty output
        assert_eq!(Step::rle_string(std::iter::empty::<&Step<u8>>()), "");

        // Single step
        let steps = to_steps::<u8>(&[(Op::Match, 1)]);
        assert_eq!(Step::rle_string(steps.iter()), "1=");

        // Multiple steps
        let steps = to_steps::<u8>(&[(Op::Match, 1), (Op::GapFirst, 2), (Op::Match, 3)]);
        assert_eq!(Step::rle_string(steps.iter()), "1=2v3=");
    }
}
