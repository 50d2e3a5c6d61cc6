// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional `bytemuck` trait impls for the class enums.

#![allow(
    unsafe_code,
    reason = "The `bytemuck` marker traits are `unsafe` and require `unsafe impl`."
)]

use crate::{
    Directionality, GraphemeClusterClass, LineBreakClass, PairedBracketType, WordBoundaryClass,
};
use bytemuck::{Contiguous, NoUninit, Zeroable, checked::CheckedBitPattern};

macro_rules! impl_class_traits {
    ($ty:ident, $zero:ident) => {
        // Safety: The enum is `repr(u8)` and has only fieldless variants.
        unsafe impl NoUninit for $ty {}

        // Safety: The enum is `repr(u8)` and `0` is a valid value.
        unsafe impl Zeroable for $ty {}

        // Safety: The enum is `repr(u8)`.
        unsafe impl CheckedBitPattern for $ty {
            type Bits = u8;

            fn is_valid_bit_pattern(bits: &u8) -> bool {
                // Don't need to compare against MIN_VALUE as this is u8 and 0 is the MIN_VALUE.
                *bits <= Self::MAX_VALUE
            }
        }

        // Safety: The enum is `repr(u8)` and its discriminants run from `0` to `MAX_VALUE`
        // without gaps.
        unsafe impl Contiguous for $ty {
            type Int = u8;
            const MIN_VALUE: u8 = Self::$zero as u8;
            #[allow(
                clippy::use_self,
                reason = "Using `Self::MAX_VALUE` here would refer to `Contiguous::MAX_VALUE` (self-reference)."
            )]
            const MAX_VALUE: u8 = $ty::MAX_VALUE;
        }
    };
}

impl_class_traits!(Directionality, L);
impl_class_traits!(PairedBracketType, None);
impl_class_traits!(LineBreakClass, OP);
impl_class_traits!(GraphemeClusterClass, Any);
impl_class_traits!(WordBoundaryClass, Ignore);

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::checked::try_from_bytes;
    use core::ptr;

    #[test]
    fn checked_bit_pattern() {
        let valid = bytemuck::bytes_of(&13_u8);
        let invalid = bytemuck::bytes_of(&200_u8);

        assert_eq!(
            Ok(&Directionality::ON),
            try_from_bytes::<Directionality>(valid)
        );
        assert_eq!(
            Ok(&LineBreakClass::HL),
            try_from_bytes::<LineBreakClass>(valid)
        );
        assert!(try_from_bytes::<GraphemeClusterClass>(invalid).is_err());
        assert!(try_from_bytes::<WordBoundaryClass>(bytemuck::bytes_of(&4_u8)).is_err());
    }

    #[test]
    fn contiguous() {
        let class = LineBreakClass::ZWJ;
        assert_eq!(
            Some(class),
            LineBreakClass::from_integer(class.into_integer())
        );
        assert_eq!(None, LineBreakClass::from_integer(255));
        assert_eq!(None, PairedBracketType::from_integer(3));
    }

    #[test]
    fn zeroable() {
        assert_eq!(Directionality::zeroed(), Directionality::L);
        assert_eq!(LineBreakClass::zeroed(), LineBreakClass::OP);
        assert_eq!(GraphemeClusterClass::zeroed(), GraphemeClusterClass::Any);
        assert_eq!(WordBoundaryClass::zeroed(), WordBoundaryClass::Ignore);
    }

    /// Tests that the [`Contiguous`] impl for [`LineBreakClass`] is not trivially incorrect.
    const _: () = {
        let mut value = 0;
        while value <= LineBreakClass::MAX_VALUE {
            // Safety: In a const context, therefore if this makes an invalid LineBreakClass, that will be detected.
            let it: LineBreakClass = unsafe { ptr::read((&raw const value).cast()) };
            // Evaluate the enum value to ensure it actually has a valid tag.
            if it as u8 != value {
                unreachable!();
            }
            value += 1;
        }
    };

    /// Tests that the [`Contiguous`] impl for [`GraphemeClusterClass`] is not trivially incorrect.
    const _: () = {
        let mut value = 0;
        while value <= GraphemeClusterClass::MAX_VALUE {
            // Safety: In a const context, therefore if this makes an invalid GraphemeClusterClass, that will be detected.
            let it: GraphemeClusterClass = unsafe { ptr::read((&raw const value).cast()) };
            // Evaluate the enum value to ensure it actually has a valid tag.
            if it as u8 != value {
                unreachable!();
            }
            value += 1;
        }
    };
}

#[cfg(doctest)]
/// Doctests aren't collected under `cfg(test)`; we can use `cfg(doctest)` instead.
mod doctests {
    /// Validates that any new variants in `Directionality` has led to a change in the `Contiguous`
    /// impl.
    ///
    /// ```compile_fail,E0080
    /// use bytemuck::Contiguous;
    /// use richtext_data::Directionality;
    /// const {
    ///     let value = Directionality::MAX_VALUE + 1;
    ///     // Safety: In a const context, therefore if this makes an invalid Directionality, that will be detected.
    ///     // (Indeed, we rely upon that)
    ///     let it: Directionality = unsafe { core::ptr::read((&raw const value).cast()) };
    ///     // Evaluate the enum value to ensure it actually has an invalid tag.
    ///     if it as u8 != value {
    ///         unreachable!();
    ///     }
    /// }
    /// ```
    const _DIRECTIONALITY: () = {};
}
