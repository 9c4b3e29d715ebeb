use std::cmp::Ordering;
use std::fmt;

/// Scalar stored in a grid cell.
///
/// One generic selection path serves every numeric width; the trait supplies
/// the pieces the strategies need beyond plain comparison.
pub trait CellValue: Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Implicit background of sparse grids.
    const ZERO: Self;

    /// Total order over values. Floats use IEEE total ordering.
    fn rank_cmp(&self, other: &Self) -> Ordering;

    /// Dense histogram slot, `None` for negative or non-integral values.
    fn bucket_index(self) -> Option<usize>;

    /// Hash key. Two values share a key iff `rank_cmp` reports them equal.
    fn hash_key(self) -> u64;
}

macro_rules! unsigned_cell_value {
    ($($t:ty),*) => {$(
        impl CellValue for $t {
            const ZERO: Self = 0;

            #[inline]
            fn rank_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline]
            fn bucket_index(self) -> Option<usize> {
                usize::try_from(self).ok()
            }

            #[inline]
            fn hash_key(self) -> u64 {
                self as u64
            }
        }
    )*};
}

macro_rules! signed_cell_value {
    ($($t:ty),*) => {$(
        impl CellValue for $t {
            const ZERO: Self = 0;

            #[inline]
            fn rank_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline]
            fn bucket_index(self) -> Option<usize> {
                usize::try_from(self).ok()
            }

            #[inline]
            fn hash_key(self) -> u64 {
                self as i64 as u64
            }
        }
    )*};
}

macro_rules! float_cell_value {
    ($($t:ty),*) => {$(
        impl CellValue for $t {
            const ZERO: Self = 0.0;

            #[inline]
            fn rank_cmp(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            fn bucket_index(self) -> Option<usize> {
                // -0.0 ranks below 0.0, so it cannot share slot 0.
                if !self.is_finite() || self.is_sign_negative() || self.fract() != 0.0 {
                    return None;
                }
                if self > usize::MAX as $t {
                    return None;
                }
                Some(self as usize)
            }

            #[inline]
            fn hash_key(self) -> u64 {
                self.to_bits() as u64
            }
        }
    )*};
}

unsigned_cell_value!(u8, u16, u32, u64, usize);
signed_cell_value!(i8, i16, i32, i64);
float_cell_value!(f32, f64);
