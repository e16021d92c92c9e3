//! Macros for declaring state sets.

/// Declare a payload-free state enum and implement [`State`](crate::core::State) for it.
///
/// The canonical name of every variant is its identifier. Variants listed
/// under `reset:` report [`is_reset`](crate::core::State::is_reset).
///
/// # Example
///
/// ```
/// use trip_lifecycle::core::State;
/// use trip_lifecycle::state_enum;
///
/// state_enum! {
///     pub enum DriverShift {
///         OffDuty,
///         Available,
///         Busy,
///         ShiftEnded,
///     }
///     reset: [ShiftEnded]
/// }
///
/// assert_eq!(DriverShift::Busy.name(), "Busy");
/// assert_eq!(DriverShift::ALL.len(), 4);
/// assert!(DriverShift::ShiftEnded.is_reset());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(reset: [$($reset:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn all() -> &'static [Self] {
                Self::ALL
            }

            #[allow(unreachable_patterns)]
            fn is_reset(&self) -> bool {
                match self {
                    $($(Self::$reset => true,)*)?
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
