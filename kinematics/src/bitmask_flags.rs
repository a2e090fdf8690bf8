use num_traits::{One, PrimInt};
use serde::{Deserialize, Serialize};

/// Trait implemented by flag enums whose discriminant selects a bit.
///
/// The enum's discriminant (via `#[repr(u8)]`) typically determines the bit index.
/// You choose the backing integer type via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // Equivalent to: 1 << index
        // NOTE: Ensure your `bit_index()` is < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask container.
///
/// Serializes as its raw integer so configs can write masks as numbers.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    pub fn from_flags<U: FlagBitmask<Storage = T> + Copy>(flags: &[U]) -> Self {
        let mut out = Self::empty();
        out.add_many(flags);
        out
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn add_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, flags: &[U]) {
        for &flag in flags {
            self.add(flag);
        }
    }

    /// True when the two masks share at least one bit.
    pub fn intersects(&self, other: Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```rust
/// kinematics::define_bitmask_flags!(SurfaceKind, u16, {
///     Solid,
///     OneWay,
///     Slippery,
/// });
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($(#[$meta:meta])* $variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$meta])* $variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}
