//! Macros for defining typed identifiers.

/// Defines a typed identifier bound to a fixed prefix.
///
/// This generates a newtype wrapper around a code with:
/// - A `PREFIX` constant
/// - `generate()` to draw a fresh code of the default length
/// - `from_code()` to wrap an externally supplied bare code
/// - `parse()` to strictly parse `{PREFIX}-{code}`
/// - `Display` and `FromStr` implementations
/// - `Serialize` and `Deserialize` implementations (as the canonical string)
///
/// # Example
///
/// ```
/// canonid_id::define_canonical_id!(AccountId, "a");
///
/// let id = AccountId::generate();
/// assert!(id.to_string().starts_with("a-"));
///
/// let parsed: AccountId = "a-abcd1234".parse().unwrap();
/// assert_eq!(parsed.code(), "abcd1234");
/// assert!("u-abcd1234".parse::<AccountId>().is_err());
/// ```
///
/// The prefix is checked at compile time:
///
/// ```compile_fail
/// canonid_id::define_canonical_id!(BrokenId, "a-b");
/// ```
///
/// ```compile_fail
/// canonid_id::define_canonical_id!(EmptyId, "");
/// ```
#[macro_export]
macro_rules! define_canonical_id {
    ($name:ident, $prefix:literal) => {
        const _: () = assert!(
            $crate::is_valid_prefix($prefix),
            "canonical id prefix must be non-empty word characters"
        );

        /// A typed canonical identifier for this entity type.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// The prefix for this identifier type.
            pub const PREFIX: &'static str = $prefix;

            /// Creates an identifier with a freshly generated code.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::generate($crate::DEFAULT_CODE_LENGTH))
            }

            /// Wraps a bare code after checking its syntax.
            pub fn from_code(code: impl Into<String>) -> Result<Self, $crate::IdError> {
                let code = code.into();
                if !$crate::is_valid_trimmed_code(&code) {
                    return Err($crate::IdError::InvalidCode { code });
                }
                Ok(Self(code))
            }

            /// Parses `{PREFIX}-{code}`.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                let code = $crate::trim(Self::PREFIX, s)?;
                Self::from_code(code)
            }

            /// Returns the code without its prefix.
            #[must_use]
            pub fn code(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}{}", Self::PREFIX, $crate::SEPARATOR, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let s = <String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                Self::parse(&s).map_err($crate::__private::serde::de::Error::custom)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::IdError;

    define_canonical_id!(AccountId, "a");
    define_canonical_id!(UserId, "u");

    #[test]
    fn test_generate_has_prefix() {
        let id = AccountId::generate();
        let s = id.to_string();
        assert!(s.starts_with("a-"));
        assert_eq!(id.code().len(), crate::DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = UserId::generate();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_wrong_prefix() {
        let result = AccountId::parse("u-abcd1234");
        assert!(matches!(result, Err(IdError::InvalidPrefixForType { .. })));
    }

    #[test]
    fn test_bad_code() {
        assert!(matches!(
            AccountId::parse("a-ab cd"),
            Err(IdError::InvalidCode { .. })
        ));
        assert!(matches!(
            AccountId::parse("a-"),
            Err(IdError::InvalidCode { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let id = AccountId::from_code("abcd1234").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a-abcd1234\"");
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_prefixes_are_word_chars() {
        assert!(crate::Prefix::new(AccountId::PREFIX).is_ok());
        assert!(crate::Prefix::new(UserId::PREFIX).is_ok());
    }
}
