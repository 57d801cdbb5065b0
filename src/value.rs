//! L2: value sets — scalar functions over index pairs, with an algebra of
//! negation, addition and multiplication that keeps constant and affine
//! shapes recognized rather than collapsing everything into an opaque
//! closure.
//!
//! Mirrors the reference `ValueSet`/`QuotedValueSet`/`GenericValueSet`/
//! `AffineValueSet` hierarchy as a tagged union: a [`ValueSet`] is either a
//! constant (`Quoted`), an arbitrary function (`Generic`), or `const +
//! coeff * func` (`Affine`). `maybe_affine` is the canonicalizer that keeps
//! arithmetic from accumulating `Affine(Affine(Affine(...)))` wrappers.

use std::fmt;
use std::sync::Arc;

/// A scalar function of a connection's `(source, target)` indices.
type Func = Arc<dyn Fn(u64, u64) -> f64 + Send + Sync>;

#[derive(Clone)]
pub enum ValueSet {
    /// A value that doesn't depend on `(i, j)`.
    Quoted(f64),
    /// An arbitrary function of `(i, j)`.
    Generic(Func),
    /// `const + coeff * func(i, j)`.
    Affine { konst: f64, coeff: f64, func: Func },
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSet::Quoted(v) => write!(f, "ValueSet::Quoted({v})"),
            ValueSet::Generic(_) => write!(f, "ValueSet::Generic(..)"),
            ValueSet::Affine { konst, coeff, .. } => {
                write!(f, "ValueSet::Affine {{ konst: {konst}, coeff: {coeff}, .. }}")
            }
        }
    }
}

impl ValueSet {
    pub fn constant(v: f64) -> Self {
        ValueSet::Quoted(v)
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(u64, u64) -> f64 + Send + Sync + 'static,
    {
        ValueSet::Generic(Arc::new(f))
    }

    /// Evaluates the value set at a connection `(i, j)`.
    pub fn call(&self, i: u64, j: u64) -> f64 {
        match self {
            ValueSet::Quoted(v) => *v,
            ValueSet::Generic(f) => f(i, j),
            ValueSet::Affine { konst, coeff, func } => konst + coeff * func(i, j),
        }
    }

    pub fn neg(&self) -> ValueSet {
        match self {
            ValueSet::Quoted(v) => ValueSet::Quoted(-v),
            ValueSet::Generic(f) => {
                let f = Arc::clone(f);
                ValueSet::Generic(Arc::new(move |i, j| -f(i, j)))
            }
            ValueSet::Affine { konst, coeff, func } => {
                maybe_affine(-konst, -coeff, Arc::clone(func))
            }
        }
    }

    pub fn add(&self, other: &ValueSet) -> ValueSet {
        match (self, other) {
            (ValueSet::Quoted(a), ValueSet::Quoted(b)) => ValueSet::Quoted(a + b),
            (ValueSet::Affine { konst, coeff, func }, ValueSet::Quoted(b)) => {
                maybe_affine(konst + b, *coeff, Arc::clone(func))
            }
            (ValueSet::Quoted(a), ValueSet::Affine { konst, coeff, func }) => {
                maybe_affine(a + konst, *coeff, Arc::clone(func))
            }
            (ValueSet::Generic(f), ValueSet::Quoted(b)) => maybe_affine(*b, 1.0, Arc::clone(f)),
            (ValueSet::Quoted(a), ValueSet::Generic(f)) => maybe_affine(*a, 1.0, Arc::clone(f)),
            (
                ValueSet::Affine {
                    konst: k1,
                    coeff: c1,
                    func: f1,
                },
                ValueSet::Affine {
                    konst: k2,
                    coeff: c2,
                    func: f2,
                },
            ) => {
                let c1 = *c1;
                let c2 = *c2;
                let f1 = Arc::clone(f1);
                let f2 = Arc::clone(f2);
                let combined: Func = Arc::new(move |i, j| c1 * f1(i, j) + c2 * f2(i, j));
                maybe_affine(k1 + k2, 1.0, combined)
            }
            (a, b) => {
                let a = a.clone();
                let b = b.clone();
                ValueSet::Generic(Arc::new(move |i, j| a.call(i, j) + b.call(i, j)))
            }
        }
    }

    pub fn mul(&self, other: &ValueSet) -> ValueSet {
        match (self, other) {
            (ValueSet::Quoted(a), ValueSet::Quoted(b)) => ValueSet::Quoted(a * b),
            (ValueSet::Affine { konst, coeff, func }, ValueSet::Quoted(b)) => {
                maybe_affine(konst * b, coeff * b, Arc::clone(func))
            }
            (ValueSet::Quoted(a), ValueSet::Affine { konst, coeff, func }) => {
                maybe_affine(a * konst, a * coeff, Arc::clone(func))
            }
            (ValueSet::Generic(f), ValueSet::Quoted(b)) => maybe_affine(0.0, *b, Arc::clone(f)),
            (ValueSet::Quoted(a), ValueSet::Generic(f)) => maybe_affine(0.0, *a, Arc::clone(f)),
            (
                ValueSet::Affine {
                    konst: k1,
                    coeff: c1,
                    func: f1,
                },
                ValueSet::Affine {
                    konst: k2,
                    coeff: c2,
                    func: f2,
                },
            ) => {
                let (k1, c1, k2, c2) = (*k1, *c1, *k2, *c2);
                let f1 = Arc::clone(f1);
                let f2 = Arc::clone(f2);
                let combined: Func =
                    Arc::new(move |i, j| k2 * c1 * f1(i, j) + k1 * c2 * f2(i, j) + c1 * c2 * f1(i, j) * f2(i, j));
                maybe_affine(k1 * k2, 1.0, combined)
            }
            (a, b) => {
                let a = a.clone();
                let b = b.clone();
                ValueSet::Generic(Arc::new(move |i, j| a.call(i, j) * b.call(i, j)))
            }
        }
    }
}

/// Folds `konst + coeff * func` back to the simplest variant: a pure
/// constant when `coeff == 0`, a bare function when it's the identity
/// affine shape, otherwise a genuine `Affine`.
fn maybe_affine(konst: f64, coeff: f64, func: Func) -> ValueSet {
    if coeff == 0.0 {
        ValueSet::Quoted(konst)
    } else if konst == 0.0 && coeff == 1.0 {
        ValueSet::Generic(func)
    } else {
        ValueSet::Affine { konst, coeff, func }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_evaluates_everywhere() {
        let v = ValueSet::constant(3.0);
        assert_eq!(v.call(0, 0), 3.0);
        assert_eq!(v.call(100, 7), 3.0);
    }

    #[test]
    fn generic_depends_on_indices() {
        let v = ValueSet::from_fn(|i, j| (i + j) as f64);
        assert_eq!(v.call(2, 3), 5.0);
    }

    #[test]
    fn affine_of_constant_collapses_to_quoted() {
        let v = ValueSet::from_fn(|i, _j| i as f64);
        let scaled = v.mul(&ValueSet::constant(0.0));
        assert!(matches!(scaled, ValueSet::Quoted(x) if x == 0.0));
    }

    #[test]
    fn add_then_scale_stays_affine() {
        let v = ValueSet::from_fn(|i, _j| i as f64);
        let shifted = v.add(&ValueSet::constant(10.0));
        match &shifted {
            ValueSet::Affine { konst, coeff, .. } => {
                assert_eq!(*konst, 10.0);
                assert_eq!(*coeff, 1.0);
            }
            other => panic!("expected Affine, got {other:?}"),
        }
        assert_eq!(shifted.call(5, 0), 15.0);
    }

    #[test]
    fn negate_affine() {
        let v = ValueSet::from_fn(|i, _j| i as f64).add(&ValueSet::constant(2.0));
        let negated = v.neg();
        assert_eq!(negated.call(3, 0), -5.0);
    }
}
