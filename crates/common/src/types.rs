use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a string-backed identifier newtype.
///
/// Catalog and order identifiers are opaque strings so that externally
/// supplied ids (`prod_1`, `ORD-1709301`) round-trip unchanged, while ids
/// minted by the engine come from a v4 UUID and never collide.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $upper:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mints a fresh, collision-resistant identifier.
            pub fn generate() -> Self {
                let raw = Uuid::new_v4().simple().to_string();
                if $upper {
                    Self(format!("{}{}", $prefix, raw.to_uppercase()))
                } else {
                    Self(format!("{}{}", $prefix, raw))
                }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a catalog product.
    ProductId,
    "prod_",
    false
);

string_id!(
    /// Identifier of a catalog category.
    CategoryId,
    "cat_",
    false
);

string_id!(
    /// Identifier of a placed order.
    OrderId,
    "ORD-",
    true
);

string_id!(
    /// Identifier of a shopper or administrator.
    UserId,
    "user_",
    false
);

const GUEST: &str = "guest";

impl UserId {
    /// The sentinel attributed to orders placed without a session.
    pub fn guest() -> Self {
        Self(GUEST.to_string())
    }

    /// Returns true for the guest sentinel.
    pub fn is_guest(&self) -> bool {
        self.0 == GUEST
    }
}
