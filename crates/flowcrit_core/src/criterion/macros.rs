/// Declares a single-valued criterion variant.
///
/// The generated struct stores `(ty, value)` with `value` masked to the bit width of the
/// first listed discriminant, so construction from any [RawField](crate::criterion::RawField)
/// never fails. Construction is crate-private; [Criteria](crate::criterion::criteria::Criteria)
/// is the public entry and is responsible for only pairing the struct with its legal types.
macro_rules! field_criterion {
    (
        $(#[$meta:meta])*
        $variant:ident => $name:ident {
            $field:ident: $store:ty,
            types: [$first:ident $(, $rest:ident)*],
            render: $fmt:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            ty: $crate::criterion::types::CriterionType,
            $field: $store,
        }

        impl $name {
            /// Number of significant bits kept from the raw input.
            pub const WIDTH: u32 = $crate::criterion::types::CriterionType::$first.bit_width();
            pub const MASK: $store = ((1u128 << Self::WIDTH) - 1) as $store;

            #[inline]
            pub(crate) fn new<R: $crate::criterion::RawField>(
                $field: R,
                ty: $crate::criterion::types::CriterionType,
            ) -> Self {
                Self {
                    ty,
                    $field: ($field.low_bits() & Self::MASK as u128) as $store,
                }
            }

            #[inline]
            pub fn $field(&self) -> $store {
                self.$field
            }
        }

        impl $crate::criterion::FieldCriterion for $name {
            const LEGAL_TYPES: &'static [$crate::criterion::types::CriterionType] = &[
                $crate::criterion::types::CriterionType::$first,
                $($crate::criterion::types::CriterionType::$rest,)*
            ];

            #[inline]
            fn r#type(&self) -> $crate::criterion::types::CriterionType {
                self.ty
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    concat!("{}{{{}=", $fmt, "}}"),
                    self.ty,
                    self.ty.label(),
                    self.$field
                )
            }
        }

        impl From<$name> for $crate::criterion::Criterion {
            #[inline]
            fn from(value: $name) -> Self {
                $crate::criterion::Criterion::$variant(value)
            }
        }
    };
}

pub(crate) use field_criterion;
