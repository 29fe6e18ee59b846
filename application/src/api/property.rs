//! [`Property`]-related definitions.

use std::future;

use common::{Money, Rating};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, read, Query as _};
use tokio::sync::OnceCell;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`Property`] listed for rent.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    id: Id,

    /// Underlying [`domain::Property`].
    property: OnceCell<domain::Property>,
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            id: property.id.into(),
            property: OnceCell::new_with(Some(property)),
        }
    }
}

impl Property {
    /// Creates a new [`Property`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Property`] with the provided ID exists,
    /// otherwise accessing this [`Property`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            property: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Property`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Property`] doesn't exist.
    async fn property(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Property, Error> {
        let id = self.id.into();
        self.property
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::property::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PropertyError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A property listed for nightly rent by its owner.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `User` owning this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.owner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner(&self, ctx: &Context) -> Result<api::User, Error> {
        let owner_id = self.property(ctx).await?.owner_id;
        #[expect(unsafe_code, reason = "owner is referenced by foreign key")]
        let owner = unsafe { api::User::new_unchecked(owner_id) };
        Ok(owner)
    }

    /// Title of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.property(ctx).await?.title.clone().into())
    }

    /// Description of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.property(ctx).await?.description.clone().into())
    }

    /// URL of the thumbnail photo of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.thumbnailPhotoUrl",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn thumbnail_photo_url(
        &self,
        ctx: &Context,
    ) -> Result<PhotoUrl, Error> {
        Ok(self.property(ctx).await?.thumbnail_photo_url.clone().into())
    }

    /// URL of the cover photo of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.coverPhotoUrl",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cover_photo_url(
        &self,
        ctx: &Context,
    ) -> Result<PhotoUrl, Error> {
        Ok(self.property(ctx).await?.cover_photo_url.clone().into())
    }

    /// Price of a single night in this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.costPerNight",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cost_per_night(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.property(ctx).await?.cost_per_night.into())
    }

    /// Address of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn address(&self, ctx: &Context) -> Result<Address, Error> {
        Ok(self.property(ctx).await?.into())
    }

    /// Number of parking spaces in this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.parkingSpaces",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn parking_spaces(&self, ctx: &Context) -> Result<Count, Error> {
        Ok(self.property(ctx).await?.parking_spaces.into())
    }

    /// Number of bathrooms in this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.numberOfBathrooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn number_of_bathrooms(
        &self,
        ctx: &Context,
    ) -> Result<Count, Error> {
        Ok(self.property(ctx).await?.number_of_bathrooms.into())
    }

    /// Number of bedrooms in this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.numberOfBedrooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn number_of_bedrooms(
        &self,
        ctx: &Context,
    ) -> Result<Count, Error> {
        Ok(self.property(ctx).await?.number_of_bedrooms.into())
    }
}

/// Address of a [`Property`].
#[derive(Clone, Debug)]
pub struct Address {
    /// Street of this [`Address`].
    street: Street,

    /// City of this [`Address`].
    city: City,

    /// Province of this [`Address`].
    province: Province,

    /// Post code of this [`Address`].
    post_code: PostCode,

    /// Country of this [`Address`].
    country: Country,
}

impl From<&domain::Property> for Address {
    fn from(property: &domain::Property) -> Self {
        Self {
            street: property.street.clone().into(),
            city: property.city.clone().into(),
            province: property.province.clone().into(),
            post_code: property.post_code.clone().into(),
            country: property.country.clone().into(),
        }
    }
}

/// Address of a `Property`.
#[graphql_object(name = "PropertyAddress", context = Context)]
impl Address {
    /// Street of this `PropertyAddress`.
    #[must_use]
    pub fn street(&self) -> &Street {
        &self.street
    }

    /// City of this `PropertyAddress`.
    #[must_use]
    pub fn city(&self) -> &City {
        &self.city
    }

    /// Province of this `PropertyAddress`.
    #[must_use]
    pub fn province(&self) -> &Province {
        &self.province
    }

    /// Post code of this `PropertyAddress`.
    #[must_use]
    pub fn post_code(&self) -> &PostCode {
        &self.post_code
    }

    /// Country of this `PropertyAddress`.
    #[must_use]
    pub fn country(&self) -> &Country {
        &self.country
    }
}

/// [`Property`] found by a search.
#[derive(Clone, Debug)]
pub struct Listing {
    /// Found [`Property`].
    property: Property,

    /// Average [`Rating`] of the found [`Property`].
    average_rating: Rating,
}

impl From<read::property::search::Listing> for Listing {
    fn from(listing: read::property::search::Listing) -> Self {
        let read::property::search::Listing {
            property,
            average_rating,
        } = listing;
        Self {
            property: property.into(),
            average_rating,
        }
    }
}

/// `Property` found by a search along with its average rating.
#[graphql_object(name = "PropertyListing", context = Context)]
impl Listing {
    /// Found `Property`.
    #[must_use]
    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Average rating of the found `Property` reviews.
    #[must_use]
    pub fn average_rating(&self) -> Rating {
        self.average_rating
    }
}

/// Unique identifier of a `Property`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(i32);

/// Title of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyTitle",
    with = scalar::Via::<domain::property::Title>,
)]
pub struct Title(domain::property::Title);

/// Description of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyDescription",
    with = scalar::Via::<domain::property::Description>,
)]
pub struct Description(domain::property::Description);

/// URL of a `Property` photo.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyPhotoUrl",
    with = scalar::Via::<domain::property::PhotoUrl>,
)]
pub struct PhotoUrl(domain::property::PhotoUrl);

/// Street of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyStreet",
    with = scalar::Via::<domain::property::Street>,
)]
pub struct Street(domain::property::Street);

/// City of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyCity",
    with = scalar::Via::<domain::property::City>,
)]
pub struct City(domain::property::City);

/// Province of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyProvince",
    with = scalar::Via::<domain::property::Province>,
)]
pub struct Province(domain::property::Province);

/// Post code of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyPostCode",
    with = scalar::Via::<domain::property::PostCode>,
)]
pub struct PostCode(domain::property::PostCode);

/// Country of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyCountry",
    with = scalar::Via::<domain::property::Country>,
)]
pub struct Country(domain::property::Country);

/// Non-negative number of rooms or spaces in a `Property`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyCount",
    with = scalar::Int::<domain::property::Count>,
)]
pub struct Count(domain::property::Count);
