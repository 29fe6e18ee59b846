//! [`User`] definitions.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

/// Registered user, either a guest booking properties or an owner listing
/// them.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`PasswordHash`] of this [`User`].
    pub password_hash: PasswordHash,
}

/// Data of a new [`User`] not stored yet.
#[derive(Clone, Debug)]
pub struct New {
    /// [`Name`] of the new [`User`].
    pub name: Name,

    /// [`Email`] of the new [`User`].
    pub email: Email,

    /// [`PasswordHash`] of the new [`User`].
    pub password_hash: PasswordHash,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);

define_text! {
    #[doc = "Name of a [`User`]."]
    Name(255)
}

/// Password of a [`User`].
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() > 1 && password.len() <= 128
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Password hash of a [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Creates a new [`PasswordHash`] from the given [`Password`].
    #[must_use]
    pub fn new(password: &Password) -> Self {
        // TODO: Hash with `argon2` once credentials verification lands.
        Self(password.0.clone())
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format: a local part without
        /// whitespace, a single `@`, and a dotted domain.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
                .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 255 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Name, Password};

    #[test]
    fn email() {
        assert!(Email::new("kira@example.com").is_some());
        assert!(Email::new("kira.b+bnb@mail.example.org").is_some());

        assert!(Email::new("kira").is_none());
        assert!(Email::new("kira@example").is_none());
        assert!(Email::new("ki ra@example.com").is_none());
        assert!(Email::new("kira@@example.com").is_none());
    }

    #[test]
    fn name() {
        assert!(Name::new("Kira Bailey").is_some());

        assert!(Name::new("").is_none());
        assert!(Name::new(" Kira").is_none());
        assert!(Name::new("x".repeat(256)).is_none());
    }

    #[test]
    fn password() {
        assert!(Password::new("password").is_some());

        assert!(Password::new("p").is_none());
        assert!(Password::new("p".repeat(129)).is_none());
    }
}
