//! Helpers for GraphQL scalars backed by domain types.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute for string-backed
/// scalars.
///
/// Uses [`FromStr`]/[`Display`] impls of `As` type to convert the target type
/// to/from GraphQL scalar.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into scalar [`Value`] by using [`Display`]
    /// impl of `As` type.
    ///
    /// [`Display`]: fmt::Display
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Constructs the target type from scalar [`Value`] by using [`FromStr`]
    /// impl of `As` type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is not a string;
    /// - the input value cannot be parsed into `As` type;
    /// - the parsed value cannot be converted into the target type.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = scalar_name::<T, S>();
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{name}`: expected string input \
                 value, found: {input}",
            )
        })?;
        s.parse::<As>()
            .map_err(|e| {
                format!("Cannot parse input scalar `{name}` from \"{s}\": {e}")
            })?
            .try_into()
            .map_err(|e| format!("Cannot parse input scalar `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be parsed as [`String`].
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Helper type to use in `#[graphql(with = ..)]` attribute for integer-backed
/// scalars.
///
/// `As` type must be convertible to/from an [`i32`], possibly failing on
/// input.
#[derive(Debug)]
pub struct Int<As>(PhantomData<As>);

impl<As> Int<As> {
    /// Converts the target type into an integer scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: Copy + Into<i32>,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::scalar((*value.as_ref()).into())
    }

    /// Constructs the target type from an integer scalar [`Value`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is not an integer;
    /// - the integer is out of `As` type range;
    /// - the `As` value cannot be converted into the target type.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: TryFrom<i32>,
        As::Error: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = scalar_name::<T, S>();
        let i = input.as_int_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{name}`: expected integer input \
                 value, found: {input}",
            )
        })?;
        As::try_from(i)
            .map_err(|e| {
                format!("Cannot parse input scalar `{name}` from {i}: {e}")
            })?
            .try_into()
            .map_err(|e| format!("Cannot parse input scalar `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be parsed as [`i32`].
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <i32 as ParseScalarValue<S>>::from_str(value)
    }
}

/// Returns the GraphQL name of the `T` scalar.
fn scalar_name<T, S>() -> &'static str
where
    T: GraphQLType<S, TypeInfo = ()>,
    S: ScalarValue,
{
    T::name(&()).unwrap_or("<unnamed>")
}
