//! Read-only views over a [`crate::ResponseBag`].

/// Declares a view together with its accessors and mapping table. Table order is
/// field order.
///
/// Fields are text unless declared `as Type => parser`, where `parser` turns the raw
/// text into `Type` (`fn(String) -> CustomResult<Type, DataObjectError>`). Typed
/// fields must be `Copy`.
macro_rules! response_view {
    (@type) => { String };
    (@type $ty:ty) => { $ty };

    (@accessor $(#[$field_meta:meta])* $field:ident) => {
        $(#[$field_meta])*
        pub fn $field(&self) -> Option<&str> {
            self.$field.as_deref()
        }
    };
    (@accessor $(#[$field_meta:meta])* $field:ident $ty:ty) => {
        $(#[$field_meta])*
        pub fn $field(&self) -> Option<$ty> {
            self.$field
        }
    };

    (@mapping $field:ident $key:ident) => {
        Mapping::text($crate::consts::ParamKey::$key, |view| &mut view.$field)
    };
    (@mapping $field:ident $key:ident $parse:path) => {
        Mapping::parsed($crate::consts::ParamKey::$key, |view, value| {
            view.$field = Some($parse(value)?);
            Ok(())
        })
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $key:ident $(as $ty:ty => $parse:path)?,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
        $vis struct $name {
            $( $field: Option<response_view!(@type $($ty)?)>, )*
        }

        impl $name {
            $(
                response_view!(@accessor $(#[$field_meta])* $field $($ty)?);
            )*
        }

        impl $crate::extractor::private::Sealed for $name {
            fn empty() -> Self {
                Self {
                    $( $field: None, )*
                }
            }

            fn mappings() -> &'static [$crate::extractor::FieldMapping<Self>] {
                type Mapping = $crate::extractor::FieldMapping<$name>;
                const MAPPINGS: &[Mapping] = &[
                    $( response_view!(@mapping $field $key $($parse)?), )*
                ];
                MAPPINGS
            }
        }

        impl $crate::extractor::ResponseView for $name {
            const NAME: &'static str = stringify!($name);
        }
    };
}

pub mod express_checkout;
pub mod transaction;

pub use express_checkout::{
    BillingExpressCheckoutGetResponse, ExpressCheckoutGetResponse, ExpressCheckoutResponse,
};
pub use transaction::TransactionResponse;
