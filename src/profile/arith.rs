//! Elementwise arithmetic on border profiles
//!
//! Every operation applies independently to lengths and counts. The right-hand
//! side is converted into this profile's parameterization and the results are
//! computed into fresh buffers, so a failing call (conversion, zero divisor or
//! integer overflow) never leaves a half-updated profile behind.

use super::element::{cast, cast_all};
use super::{BorderProfile, ProfileElement, PARALLEL_THRESHOLD};
use crate::error::{Error, Result};
use num_traits::Signed;
use rayon::prelude::*;

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply<T: ProfileElement>(self, a: T, b: T) -> Option<T> {
        match self {
            Op::Add => a.try_add(b),
            Op::Sub => a.try_sub(b),
            Op::Mul => a.try_mul(b),
            Op::Div => a.try_div(b),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Op::Add => "addition",
            Op::Sub => "subtraction",
            Op::Mul => "multiplication",
            Op::Div => "division",
        }
    }

    fn overflow(self) -> Error {
        Error::Overflow {
            operation: self.name(),
        }
    }
}

fn zip_checked<T: ProfileElement>(lhs: &[T], rhs: &[T], op: Op) -> Result<Vec<T>> {
    let result: Option<Vec<T>> = if lhs.len() < PARALLEL_THRESHOLD {
        lhs.iter().zip(rhs).map(|(&a, &b)| op.apply(a, b)).collect()
    } else {
        lhs.par_iter()
            .zip(rhs.par_iter())
            .map(|(&a, &b)| op.apply(a, b))
            .collect()
    };
    result.ok_or_else(|| op.overflow())
}

fn scalar_checked<T: ProfileElement>(lhs: &[T], rhs: T, op: Op) -> Result<Vec<T>> {
    let result: Option<Vec<T>> = if lhs.len() < PARALLEL_THRESHOLD {
        lhs.iter().map(|&a| op.apply(a, rhs)).collect()
    } else {
        lhs.par_iter().map(|&a| op.apply(a, rhs)).collect()
    };
    result.ok_or_else(|| op.overflow())
}

impl<V, W> BorderProfile<V, W>
where
    V: ProfileElement,
    W: ProfileElement + Signed,
{
    fn apply_profile<N, E>(&mut self, other: &BorderProfile<N, E>, op: Op) -> Result<()>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.check_shape(other.border_count())?;

        let lengths: Vec<W> = cast_all(other.lengths())?;
        let counts: Vec<V> = cast_all(other.counts())?;

        if matches!(op, Op::Div)
            && (lengths.iter().any(|&d| W::is_invalid_divisor(d))
                || counts.iter().any(|&d| V::is_invalid_divisor(d)))
        {
            return Err(Error::DivisionByZero);
        }

        let lengths = zip_checked(&self.lengths, &lengths, op)?;
        let counts = zip_checked(&self.counts, &counts, op)?;
        self.lengths = lengths;
        self.counts = counts;
        Ok(())
    }

    fn apply_scalar<T: ProfileElement>(&mut self, num: T, op: Op) -> Result<()> {
        let length: W = cast(num)?;
        let count: V = cast(num)?;

        if matches!(op, Op::Div) && (W::is_invalid_divisor(length) || V::is_invalid_divisor(count))
        {
            return Err(Error::DivisionByZero);
        }

        let lengths = scalar_checked(&self.lengths, length, op)?;
        let counts = scalar_checked(&self.counts, count, op)?;
        self.lengths = lengths;
        self.counts = counts;
        Ok(())
    }

    pub fn add_assign_profile<N, E>(&mut self, other: &BorderProfile<N, E>) -> Result<()>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.apply_profile(other, Op::Add)
    }

    pub fn sub_assign_profile<N, E>(&mut self, other: &BorderProfile<N, E>) -> Result<()>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.apply_profile(other, Op::Sub)
    }

    pub fn mul_assign_profile<N, E>(&mut self, other: &BorderProfile<N, E>) -> Result<()>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.apply_profile(other, Op::Mul)
    }

    /// Elementwise division. Integer elements fail with
    /// [`Error::DivisionByZero`] if any divisor is zero.
    pub fn div_assign_profile<N, E>(&mut self, other: &BorderProfile<N, E>) -> Result<()>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.apply_profile(other, Op::Div)
    }

    pub fn add_profile<N, E>(&self, other: &BorderProfile<N, E>) -> Result<Self>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        let mut sum = self.clone();
        sum.add_assign_profile(other)?;
        Ok(sum)
    }

    pub fn sub_profile<N, E>(&self, other: &BorderProfile<N, E>) -> Result<Self>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        let mut diff = self.clone();
        diff.sub_assign_profile(other)?;
        Ok(diff)
    }

    pub fn mul_profile<N, E>(&self, other: &BorderProfile<N, E>) -> Result<Self>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        let mut product = self.clone();
        product.mul_assign_profile(other)?;
        Ok(product)
    }

    pub fn div_profile<N, E>(&self, other: &BorderProfile<N, E>) -> Result<Self>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        let mut quotient = self.clone();
        quotient.div_assign_profile(other)?;
        Ok(quotient)
    }

    /// Add `num` to every length and every count
    pub fn add_assign_scalar<T: ProfileElement>(&mut self, num: T) -> Result<()> {
        self.apply_scalar(num, Op::Add)
    }

    pub fn sub_assign_scalar<T: ProfileElement>(&mut self, num: T) -> Result<()> {
        self.apply_scalar(num, Op::Sub)
    }

    pub fn mul_assign_scalar<T: ProfileElement>(&mut self, num: T) -> Result<()> {
        self.apply_scalar(num, Op::Mul)
    }

    pub fn div_assign_scalar<T: ProfileElement>(&mut self, num: T) -> Result<()> {
        self.apply_scalar(num, Op::Div)
    }

    pub fn add_scalar<T: ProfileElement>(&self, num: T) -> Result<Self> {
        let mut sum = self.clone();
        sum.add_assign_scalar(num)?;
        Ok(sum)
    }

    pub fn sub_scalar<T: ProfileElement>(&self, num: T) -> Result<Self> {
        let mut diff = self.clone();
        diff.sub_assign_scalar(num)?;
        Ok(diff)
    }

    pub fn mul_scalar<T: ProfileElement>(&self, num: T) -> Result<Self> {
        let mut product = self.clone();
        product.mul_assign_scalar(num)?;
        Ok(product)
    }

    pub fn div_scalar<T: ProfileElement>(&self, num: T) -> Result<Self> {
        let mut quotient = self.clone();
        quotient.div_assign_scalar(num)?;
        Ok(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(lengths: &[i64], counts: &[i64]) -> BorderProfile<i64, i64> {
        let mut p = BorderProfile::new(lengths.len());
        for (i, (&l, &c)) in lengths.iter().zip(counts).enumerate() {
            p.set_length(i, l).unwrap();
            p.set_count(i, c).unwrap();
        }
        p
    }

    #[test]
    fn profile_arithmetic_is_elementwise() {
        let a = profile(&[4, 6], &[8, 9]);
        let b = profile(&[2, 3], &[4, 3]);

        assert_eq!(a.add_profile(&b).unwrap(), profile(&[6, 9], &[12, 12]));
        assert_eq!(a.sub_profile(&b).unwrap(), profile(&[2, 3], &[4, 6]));
        assert_eq!(a.mul_profile(&b).unwrap(), profile(&[8, 18], &[32, 27]));
        assert_eq!(a.div_profile(&b).unwrap(), profile(&[2, 2], &[2, 3]));
    }

    #[test]
    fn scalar_arithmetic_touches_both_sequences() {
        let a = profile(&[4, 6], &[8, 9]);
        assert_eq!(a.add_scalar(1u8).unwrap(), profile(&[5, 7], &[9, 10]));
        assert_eq!(a.sub_scalar(1).unwrap(), profile(&[3, 5], &[7, 8]));
        assert_eq!(a.mul_scalar(2.0f64).unwrap(), profile(&[8, 12], &[16, 18]));
        assert_eq!(a.div_scalar(2).unwrap(), profile(&[2, 3], &[4, 4]));
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        let mut a = profile(&[4, 6], &[8, 9]);
        let b = profile(&[2, 0], &[1, 1]);
        assert!(matches!(a.div_assign_profile(&b), Err(Error::DivisionByZero)));
        assert!(matches!(a.div_assign_scalar(0), Err(Error::DivisionByZero)));
        assert_eq!(a, profile(&[4, 6], &[8, 9]));
    }

    #[test]
    fn float_division_by_zero_follows_ieee() {
        let mut a: BorderProfile<f64, f64> = BorderProfile::new(1);
        a.set_length(0, 1.0).unwrap();
        a.div_assign_scalar(0.0).unwrap();
        assert!(a.length(0).unwrap().is_infinite());
        assert!(a.count(0).unwrap().is_nan());
    }

    #[test]
    fn cross_parameterized_rhs_is_converted() {
        let mut a = profile(&[1, 2], &[3, 4]);
        let mut b: BorderProfile<u8, f32> = BorderProfile::new(2);
        b.set_length(1, 5.0).unwrap();
        b.set_count(0, 7).unwrap();
        a.add_assign_profile(&b).unwrap();
        assert_eq!(a, profile(&[1, 7], &[10, 4]));
    }

    #[test]
    fn shape_mismatch_leaves_profile_untouched() {
        let mut a = profile(&[1, 2], &[3, 4]);
        let b = profile(&[1], &[1]);
        assert!(matches!(
            a.add_assign_profile(&b),
            Err(Error::ShapeMismatch { left: 2, right: 1 })
        ));
        assert_eq!(a, profile(&[1, 2], &[3, 4]));
    }

    #[test]
    fn unrepresentable_scalar_is_rejected() {
        let mut a: BorderProfile<u32, i64> = BorderProfile::new(1);
        assert!(matches!(
            a.add_assign_scalar(-1i32),
            Err(Error::Conversion { target: "u32", .. })
        ));
    }

    #[test]
    fn unsigned_underflow_is_an_error() {
        let mut a: BorderProfile<u32, i64> = BorderProfile::new(1);
        a.set_length(0, 5).unwrap();
        a.set_count(0, 1).unwrap();
        let mut b: BorderProfile<u32, i64> = BorderProfile::new(1);
        b.set_count(0, 2).unwrap();

        assert!(matches!(
            a.sub_profile(&b),
            Err(Error::Overflow { operation: "subtraction" })
        ));
        assert!(a.sub_assign_profile(&b).is_err());
        assert_eq!(a.length(0).unwrap(), 5);
        assert_eq!(a.count(0).unwrap(), 1);
    }

    #[test]
    fn scalar_overflow_leaves_profile_untouched() {
        let mut a: BorderProfile<u64, i64> = BorderProfile::new(2);
        a.set_length(0, 3).unwrap();
        a.set_count(1, u64::MAX / 2 + 1).unwrap();

        assert!(matches!(
            a.mul_assign_scalar(2u8),
            Err(Error::Overflow { operation: "multiplication" })
        ));
        assert_eq!(a.lengths(), &[3, 0]);
        assert_eq!(a.counts(), &[0, u64::MAX / 2 + 1]);

        let mut b = profile(&[i64::MIN], &[1]);
        assert!(b.div_assign_scalar(-1).is_err());
        assert!(b.add_assign_profile(&profile(&[-1], &[0])).is_err());
        assert_eq!(b, profile(&[i64::MIN], &[1]));
    }

    #[test]
    fn wide_overflow_is_detected_in_parallel() {
        let width = PARALLEL_THRESHOLD + 10;
        let mut a: BorderProfile<u8, i64> = BorderProfile::new(width);
        a.set_count(width - 1, 200).unwrap();
        assert!(a.add_assign_scalar(100u8).is_err());
        assert_eq!(a.count(width - 1).unwrap(), 200);
        assert_eq!(a.count(0).unwrap(), 0);
    }

    #[test]
    fn unsigned_right_hand_side_is_accepted() {
        let mut a = profile(&[1, 2], &[3, 4]);
        let mut b: BorderProfile<u32, u32> = BorderProfile::new(2);
        b.set_length(0, 4).unwrap();
        b.set_count(1, 6).unwrap();
        a.sub_assign_profile(&b).unwrap();
        assert_eq!(a, profile(&[-3, 2], &[3, -2]));
    }

    #[test]
    fn zero_width_operations_succeed() {
        let a: BorderProfile<i64, i64> = BorderProfile::new(0);
        let b: BorderProfile<i64, i64> = BorderProfile::new(0);
        assert_eq!(a.add_profile(&b).unwrap().border_count(), 0);
        assert_eq!(a.div_profile(&b).unwrap().border_count(), 0);
        assert_eq!(a.compare(&b).unwrap(), 0);
    }
}
