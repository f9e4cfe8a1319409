//! Normalization shared by dimension-sets and unit-sets.
//!
//! A composite is a product of atomic factors. Its canonical form is obtained by sorting all factors, merging
//! adjacent factors that occupy the same slot (same dimension name, or same unit name at the same power of ten)
//! by summing their exponents, and dropping anything whose exponent became zero. Two composites describing the
//! same product therefore end up with identical factor vectors, which is what makes them usable as map keys.

use crate::Exponent;
use num_traits::Zero;

/// An atomic factor of a composite (a [`crate::Dimension`] or a [`crate::Unit`]).
///
/// `Ord` must be name-major so that factors sharing a slot are adjacent after sorting.
pub(crate) trait Factor: Ord {
    /// Whether `self` and `other` merge into one entry.
    fn same_slot(&self, other: &Self) -> bool;

    fn power(&self) -> Exponent;

    fn set_power(&mut self, power: Exponent);
}

/// Sorts, merges and prunes `factors` into canonical order.
pub(crate) fn canonicalize<F: Factor>(mut factors: Vec<F>) -> Vec<F> {
    factors.sort();

    let mut merged: Vec<F> = Vec::with_capacity(factors.len());
    for factor in factors {
        match merged.last_mut() {
            Some(last) if last.same_slot(&factor) => {
                let power = last.power() + factor.power();
                last.set_power(power);
            }
            _ => merged.push(factor),
        }
    }

    merged.retain(|f| !f.power().is_zero());
    merged
}

/// Multiplies every factor's exponent by `by`, then re-normalizes.
pub(crate) fn scale_powers<F: Factor + Clone>(factors: &[F], by: Exponent) -> Vec<F> {
    if by.is_zero() {
        return Vec::new();
    }
    let scaled = factors
        .iter()
        .cloned()
        .map(|mut f| {
            let power = f.power() * by;
            f.set_power(power);
            f
        })
        .collect();
    canonicalize(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Atom(&'static str, Exponent);

    impl Factor for Atom {
        fn same_slot(&self, other: &Self) -> bool {
            self.0 == other.0
        }
        fn power(&self) -> Exponent {
            self.1
        }
        fn set_power(&mut self, power: Exponent) {
            self.1 = power;
        }
    }

    fn atom(name: &'static str, p: i32) -> Atom {
        Atom(name, Exponent::from_integer(p))
    }

    #[test]
    fn merges_same_slot() {
        let out = canonicalize(vec![atom("b", 1), atom("a", 1), atom("b", 2)]);
        assert_eq!(out, vec![atom("a", 1), atom("b", 3)]);
    }

    #[test]
    fn drops_cancelled_entries() {
        let out = canonicalize(vec![atom("a", 1), atom("b", 1), atom("a", -1)]);
        assert_eq!(out, vec![atom("b", 1)]);
    }

    #[test]
    fn intermediate_zero_does_not_split_a_run() {
        let out = canonicalize(vec![atom("a", -1), atom("a", 1), atom("a", 1)]);
        assert_eq!(out, vec![atom("a", 1)]);
    }

    #[test]
    fn empty_input_is_identity() {
        assert!(canonicalize::<Atom>(Vec::new()).is_empty());
    }

    #[test]
    fn scaling_by_zero_empties() {
        assert!(scale_powers(&[atom("a", 2)], Exponent::zero()).is_empty());
        assert_eq!(
            scale_powers(&[atom("a", 2)], Exponent::new(1, 2)),
            vec![atom("a", 1)]
        );
    }
}
