use std::fmt::Debug;

use crate::error::FractalError;

// Integer types a fractal grid can hold.
// 0 doubles as "not generated yet", so pre-seeded cells must be non-zero.
pub trait CellValue: Copy + Default + PartialEq + Debug {
    // Largest value the type can store, as seen by the generators
    const CEILING: i32;

    fn to_i32(self) -> i32;

    // Narrow a computed value, saturating at the type's bounds
    fn from_i64(value: i64) -> Self;

    #[inline]
    fn is_unset(self) -> bool {
        self.to_i32() == 0
    }
}

macro_rules! impl_cell_value {
    ($($t:ty),*) => {
        $(
            impl CellValue for $t {
                const CEILING: i32 = <$t>::MAX as i32;

                #[inline]
                fn to_i32(self) -> i32 {
                    self as i32
                }

                #[inline]
                fn from_i64(value: i64) -> Self {
                    value.clamp(<$t>::MIN as i64, <$t>::MAX as i64) as $t
                }
            }
        )*
    };
}

impl_cell_value!(u8, u16, i32);

// Inclusive [0, max] range of generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    max: i32,
}

impl ValueRange {
    // The fixed 0..=255 range of the byte map
    pub const BYTE: ValueRange = ValueRange { max: 255 };

    pub fn new(max: i64) -> Result<Self, FractalError> {
        if max < 1 {
            return Err(FractalError::InvalidMaxValue(max));
        }
        let max = i32::try_from(max).map_err(|_| FractalError::MaxValueTooLarge {
            max_value: max,
            cell_max: i32::MAX,
        })?;
        Ok(Self { max })
    }

    // Range for a grid of `T`, rejecting a max the type cannot store
    pub fn for_cell<T: CellValue>(max: i64) -> Result<Self, FractalError> {
        let range = Self::new(max)?;
        if range.max > T::CEILING {
            return Err(FractalError::MaxValueTooLarge {
                max_value: max,
                cell_max: T::CEILING,
            });
        }
        Ok(range)
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        (0..=self.max).contains(&value)
    }

    #[inline]
    pub fn clamp(&self, value: i64) -> i32 {
        value.clamp(0, i64::from(self.max)) as i32
    }

    // Clamp with a raised floor; the 1D generator keeps 0 for "unset"
    #[inline]
    pub fn clamp_above(&self, value: i64, floor: i32) -> i32 {
        value.clamp(i64::from(floor), i64::from(self.max)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, ValueRange};
    use crate::FractalError;

    #[test]
    fn cell_narrowing_saturates() {
        assert_eq!(u8::from_i64(300), 255);
        assert_eq!(u8::from_i64(-4), 0);
        assert_eq!(u16::from_i64(70_000), u16::MAX);
        assert_eq!(i32::from_i64(1234), 1234);
    }

    #[test]
    fn zero_is_unset() {
        assert!(0u8.is_unset());
        assert!(!1u16.is_unset());
        assert!(!(-1i32).is_unset());
    }

    #[test]
    fn range_rejects_bad_max() {
        assert!(matches!(
            ValueRange::new(0),
            Err(FractalError::InvalidMaxValue(0))
        ));
        assert!(matches!(
            ValueRange::for_cell::<u8>(256),
            Err(FractalError::MaxValueTooLarge { cell_max: 255, .. })
        ));
        assert_eq!(ValueRange::for_cell::<u16>(1000).unwrap().max(), 1000);
    }

    #[test]
    fn range_clamps() {
        let r = ValueRange::new(100).unwrap();
        assert_eq!(r.clamp(-50), 0);
        assert_eq!(r.clamp(150), 100);
        assert_eq!(r.clamp_above(0, 1), 1);
        assert_eq!(ValueRange::BYTE.clamp(255), 255);
    }
}
