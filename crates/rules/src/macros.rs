//! Macros for declaring predicates with minimal boilerplate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_rules::predicate;
//! use nebula_rules::RuleKey;
//!
//! // Unit predicate (no fields)
//! predicate! {
//!     pub NonNull;
//!     key { Some(RuleKey::named("non_null")) }
//!     rule(value, all) { !value.is_null() }
//!     fn non_null();
//! }
//!
//! // Struct with fields
//! predicate! {
//!     pub MinChars { min: usize };
//!     key(self) { Some(RuleKey::named(format!("min_chars({})", self.min))) }
//!     rule(self, value, all) { value.as_str().is_some_and(|s| s.chars().count() >= self.min) }
//!     new(min: usize) { Self { min } }
//!     fn min_chars(min: usize);
//! }
//! ```

/// Creates a predicate: struct definition, [`Predicate`](crate::Predicate)
/// implementation and factory function.
///
/// Unit predicates derive `Debug, Clone, Copy, PartialEq, Eq, Hash, Default`.
/// Predicates with fields derive `Debug, Clone`; add extra derives via
/// `#[derive(...)]`.
#[macro_export]
macro_rules! predicate {
    // ── Unit predicate (no fields) + factory fn ─────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        key $key:block
        rule($val:ident, $all:ident) $rule:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::Predicate for $name {
            fn key(&self) -> Option<$crate::RuleKey> $key

            #[allow(unused_variables)]
            fn test(
                &self,
                $val: &$crate::predicate::Value,
                $all: &$crate::FieldValues,
            ) -> bool $rule
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Struct with fields + custom new + factory fn ────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        key($kself:ident) $key:block
        rule($rself:ident, $val:ident, $all:ident) $rule:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        impl $crate::Predicate for $name {
            fn key(&$kself) -> Option<$crate::RuleKey> $key

            #[allow(unused_variables)]
            fn test(
                &$rself,
                $val: &$crate::predicate::Value,
                $all: &$crate::FieldValues,
            ) -> bool $rule
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}
