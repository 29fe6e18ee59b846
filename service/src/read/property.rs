//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod search {
    //! [`Property`] search definitions.

    use common::{Money, Rating};

    use crate::{
        domain::{property, user, Property},
        read::Limit,
    };

    /// Options narrowing a [`Property`] search.
    ///
    /// Every option is independent and optional.
    #[derive(Clone, Debug, Default)]
    pub struct Options {
        /// Part of a [`property::City`] to search for, case-insensitively.
        pub city: Option<property::City>,

        /// ID of the [`Property`] owner.
        pub owner_id: Option<user::Id>,

        /// Lowest acceptable price of a night, in major units.
        pub minimum_price_per_night: Option<Money>,

        /// Highest acceptable price of a night, in major units.
        pub maximum_price_per_night: Option<Money>,

        /// Lowest acceptable average [`Rating`] of a [`Property`].
        pub minimum_rating: Option<Rating>,
    }

    /// Selector of a [`Property`] search.
    #[derive(Clone, Debug, Default)]
    pub struct Selector {
        /// Search [`Options`].
        pub options: Options,

        /// Maximum number of [`Listing`]s to return.
        pub limit: Limit,
    }

    /// [`Property`] found by a search.
    #[derive(Clone, Debug)]
    pub struct Listing {
        /// Found [`Property`].
        pub property: Property,

        /// Average [`Rating`] of the found [`Property`] reviews.
        pub average_rating: Rating,
    }
}
