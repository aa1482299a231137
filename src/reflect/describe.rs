//! The [`Describe`] trait and impls for common payload building blocks.
//!
//! With no runtime reflection available, each describable type exposes its
//! own shape: a qualified name, a reflection of a live value, and a
//! zero-valued prototype used where no live value exists (array elements of
//! empty arrays). Scalars, `String`, `Option<T>`, `Vec<T>`, and chrono
//! date/times are covered here; domain model types implement the trait by
//! hand, listing their fields in declaration order.

use crate::reflect::{ArrayShape, QualifiedName, Reflected};
use chrono::{DateTime, TimeZone};

/// Self-description contract for payload types.
pub trait Describe {
    /// Qualified wire-level type name, e.g. `model.User`.
    fn qualified_name() -> QualifiedName;

    /// Reflect a live value into the shape model.
    fn reflect(&self) -> Reflected;

    /// Zero-valued shape of the type, independent of any live value.
    ///
    /// Prototypes describe the static shape: an optional reference keeps its
    /// target shape here (rather than collapsing to a null reference) so
    /// array-element prototypes do not lose nested structure.
    fn reflect_zero() -> Reflected;
}

macro_rules! scalar_describe {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn qualified_name() -> QualifiedName {
                    QualifiedName::from($name)
                }

                fn reflect(&self) -> Reflected {
                    Self::reflect_zero()
                }

                fn reflect_zero() -> Reflected {
                    Reflected::Scalar {
                        type_name: Self::qualified_name(),
                    }
                }
            }
        )+
    };
}

scalar_describe! {
    String => "string",
    bool => "bool",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    f32 => "f32",
    f64 => "f64",
}

impl<T: Describe> Describe for Option<T> {
    fn qualified_name() -> QualifiedName {
        // References are transparent: the name is the target's name.
        T::qualified_name()
    }

    fn reflect(&self) -> Reflected {
        Reflected::Reference(self.as_ref().map(|value| Box::new(value.reflect())))
    }

    fn reflect_zero() -> Reflected {
        Reflected::Reference(Some(Box::new(T::reflect_zero())))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn qualified_name() -> QualifiedName {
        QualifiedName(format!("[]{}", T::qualified_name()))
    }

    fn reflect(&self) -> Reflected {
        Reflected::Array(ArrayShape {
            element_type: T::qualified_name(),
            element: Box::new(T::reflect_zero()),
            first: self.first().map(|value| Box::new(value.reflect())),
        })
    }

    fn reflect_zero() -> Reflected {
        Reflected::Array(ArrayShape {
            element_type: T::qualified_name(),
            element: Box::new(T::reflect_zero()),
            first: None,
        })
    }
}

impl<Tz: TimeZone> Describe for DateTime<Tz> {
    fn qualified_name() -> QualifiedName {
        QualifiedName::from(crate::reflect::DATETIME_TYPE_NAME)
    }

    fn reflect(&self) -> Reflected {
        Reflected::DateTime
    }

    fn reflect_zero() -> Reflected {
        Reflected::DateTime
    }
}
