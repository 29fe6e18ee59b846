//! [`Reservation`]-related read definitions.

#[cfg(doc)]
use crate::domain::Reservation;

pub mod listing {
    //! [`Reservation`] listing definitions.

    use common::Rating;

    use crate::{
        domain::{user, Property, Reservation},
        read::Limit,
    };
    #[cfg(doc)]
    use crate::domain::User;

    /// Part of a guest's [`Reservation`]s timeline.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Timeframe {
        /// [`Reservation`]s started today or earlier.
        Fulfilled,

        /// [`Reservation`]s starting after today.
        Upcoming,
    }

    /// Selector of a [`Reservation`] listing.
    #[derive(Clone, Copy, Debug)]
    pub struct Selector {
        /// ID of the guest [`User`] whose [`Reservation`]s are listed.
        pub guest_id: user::Id,

        /// [`Timeframe`] of the listed [`Reservation`]s.
        pub timeframe: Timeframe,

        /// Maximum number of [`Item`]s to return.
        pub limit: Limit,
    }

    impl Selector {
        /// Selects fulfilled [`Reservation`]s of the given guest.
        #[must_use]
        pub fn fulfilled(guest_id: user::Id, limit: Limit) -> Self {
            Self {
                guest_id,
                timeframe: Timeframe::Fulfilled,
                limit,
            }
        }

        /// Selects upcoming [`Reservation`]s of the given guest.
        #[must_use]
        pub fn upcoming(guest_id: user::Id, limit: Limit) -> Self {
            Self {
                guest_id,
                timeframe: Timeframe::Upcoming,
                limit,
            }
        }
    }

    /// [`Reservation`] with its [`Property`] details.
    #[derive(Clone, Debug)]
    pub struct Item {
        /// Listed [`Reservation`].
        pub reservation: Reservation,

        /// Reserved [`Property`].
        pub property: Property,

        /// Average [`Rating`] of the reserved [`Property`] reviews.
        pub average_rating: Rating,
    }
}
