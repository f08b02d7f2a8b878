//! Numeric element types a border profile can be parameterized with

use crate::error::{Error, Result};
use num_traits::{Num, NumCast};
use std::fmt::{Debug, Display};

/// Scalar usable as a profile length or count.
///
/// Integer elements reject a zero divisor up front and report overflow through
/// the `try_*` operations; floating elements accept both and produce IEEE
/// infinities or NaN.
pub trait ProfileElement:
    Copy + Debug + Display + PartialOrd + Num + NumCast + Send + Sync + 'static
{
    /// Name used in conversion error messages
    const TYPE_NAME: &'static str;

    /// Whether dividing by `divisor` has no defined result for this type
    fn is_invalid_divisor(divisor: Self) -> bool;

    fn try_add(self, rhs: Self) -> Option<Self>;

    fn try_sub(self, rhs: Self) -> Option<Self>;

    fn try_mul(self, rhs: Self) -> Option<Self>;

    /// `None` on a zero divisor or on `MIN / -1`
    fn try_div(self, rhs: Self) -> Option<Self>;
}

macro_rules! integer_element {
    ($($t:ty),*) => {
        $(
            impl ProfileElement for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn is_invalid_divisor(divisor: Self) -> bool {
                    divisor == 0
                }

                fn try_add(self, rhs: Self) -> Option<Self> {
                    self.checked_add(rhs)
                }

                fn try_sub(self, rhs: Self) -> Option<Self> {
                    self.checked_sub(rhs)
                }

                fn try_mul(self, rhs: Self) -> Option<Self> {
                    self.checked_mul(rhs)
                }

                fn try_div(self, rhs: Self) -> Option<Self> {
                    self.checked_div(rhs)
                }
            }
        )*
    };
}

macro_rules! float_element {
    ($($t:ty),*) => {
        $(
            impl ProfileElement for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn is_invalid_divisor(_divisor: Self) -> bool {
                    false
                }

                fn try_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                fn try_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }

                fn try_mul(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }

                fn try_div(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }
            }
        )*
    };
}

integer_element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
float_element!(f32, f64);

/// Convert one element into another parameterization
pub(crate) fn cast<T: ProfileElement, U: ProfileElement>(value: T) -> Result<U> {
    <U as NumCast>::from(value).ok_or_else(|| Error::Conversion {
        value: value.to_string(),
        target: U::TYPE_NAME,
    })
}

/// Convert a whole slice, failing on the first unrepresentable value
pub(crate) fn cast_all<T: ProfileElement, U: ProfileElement>(values: &[T]) -> Result<Vec<U>> {
    values.iter().map(|&v| cast(v)).collect()
}
