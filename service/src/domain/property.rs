//! [`Property`] definitions.

use common::MinorUnits;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Property listed for nightly rent by its owner.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Property`].
    pub owner_id: user::Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// Thumbnail [`PhotoUrl`] of this [`Property`].
    pub thumbnail_photo_url: PhotoUrl,

    /// Cover [`PhotoUrl`] of this [`Property`].
    pub cover_photo_url: PhotoUrl,

    /// Price of a single night in this [`Property`].
    pub cost_per_night: MinorUnits,

    /// [`Street`] this [`Property`] is located on.
    pub street: Street,

    /// [`City`] this [`Property`] is located in.
    pub city: City,

    /// [`Province`] this [`Property`] is located in.
    pub province: Province,

    /// [`PostCode`] of this [`Property`].
    pub post_code: PostCode,

    /// [`Country`] this [`Property`] is located in.
    pub country: Country,

    /// Number of parking spaces in this [`Property`].
    pub parking_spaces: Count,

    /// Number of bathrooms in this [`Property`].
    pub number_of_bathrooms: Count,

    /// Number of bedrooms in this [`Property`].
    pub number_of_bedrooms: Count,
}

/// Data of a new [`Property`] not stored yet.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the [`User`] owning the new [`Property`].
    pub owner_id: user::Id,

    /// [`Title`] of the new [`Property`].
    pub title: Title,

    /// [`Description`] of the new [`Property`].
    pub description: Description,

    /// Thumbnail [`PhotoUrl`] of the new [`Property`].
    pub thumbnail_photo_url: PhotoUrl,

    /// Cover [`PhotoUrl`] of the new [`Property`].
    pub cover_photo_url: PhotoUrl,

    /// Price of a single night in the new [`Property`].
    pub cost_per_night: MinorUnits,

    /// [`Street`] the new [`Property`] is located on.
    pub street: Street,

    /// [`City`] the new [`Property`] is located in.
    pub city: City,

    /// [`Province`] the new [`Property`] is located in.
    pub province: Province,

    /// [`PostCode`] of the new [`Property`].
    pub post_code: PostCode,

    /// [`Country`] the new [`Property`] is located in.
    pub country: Country,

    /// Number of parking spaces in the new [`Property`].
    pub parking_spaces: Count,

    /// Number of bathrooms in the new [`Property`].
    pub number_of_bathrooms: Count,

    /// Number of bedrooms in the new [`Property`].
    pub number_of_bedrooms: Count,
}

/// ID of a [`Property`].
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

/// Number of rooms or spaces of some kind in a [`Property`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Count(i32);

impl Count {
    /// Creates a new [`Count`] if the given one is not negative.
    #[must_use]
    pub fn new(count: i32) -> Option<Self> {
        (count >= 0).then_some(Self(count))
    }
}

impl TryFrom<i32> for Count {
    type Error = &'static str;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Self::new(count).ok_or("negative `Count`")
    }
}

define_text! {
    #[doc = "Title of a [`Property`]."]
    Title(255)
}

define_text! {
    #[doc = "Free-form description of a [`Property`]."]
    Description(8192)
}

define_text! {
    #[doc = "URL of a [`Property`] photo."]
    PhotoUrl(2048)
}

define_text! {
    #[doc = "Street of a [`Property`]."]
    Street(255)
}

define_text! {
    #[doc = "City of a [`Property`]."]
    City(255)
}

define_text! {
    #[doc = "Province of a [`Property`]."]
    Province(255)
}

define_text! {
    #[doc = "Post code of a [`Property`]."]
    PostCode(255)
}

define_text! {
    #[doc = "Country of a [`Property`]."]
    Country(255)
}

#[cfg(test)]
mod spec {
    use super::{City, Count, Description};

    #[test]
    fn text_is_trimmed_and_non_empty() {
        assert!(City::new("Miami").is_some());
        assert!(City::new("New York").is_some());

        assert!(City::new("").is_none());
        assert!(City::new("Miami ").is_none());
        assert!(City::new("\tMiami").is_none());
    }

    #[test]
    fn text_is_bounded() {
        assert!(Description::new("x".repeat(8192)).is_some());
        assert!(Description::new("x".repeat(8193)).is_none());
    }

    #[test]
    fn count_is_not_negative() {
        assert!(Count::new(0).is_some());
        assert!(Count::new(3).is_some());

        assert!(Count::new(-1).is_none());
    }
}
