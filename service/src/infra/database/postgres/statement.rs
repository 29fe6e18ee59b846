//! Dynamically built SQL [`Statement`] definitions.

use derive_more::Display;
use itertools::Itertools as _;
use tokio_postgres::types::ToSql;

/// Marker of a positional parameter inside a [`Clause`] template.
pub const MARKER: &str = "$?";

/// Value bound to a [`Statement`] parameter.
pub type Value = Box<dyn ToSql + Send + Sync>;

/// Wraps the provided `val` into a [`Value`].
#[must_use]
pub fn value<T>(val: T) -> Value
where
    T: ToSql + Send + Sync + 'static,
{
    Box::new(val)
}

/// SQL statement along with its positional parameters.
#[derive(Debug)]
pub struct Statement {
    /// SQL text of this [`Statement`].
    pub sql: String,

    /// [`Params`] bound to this [`Statement`].
    pub params: Params,
}

/// Positional parameters of a [`Statement`], numbered from `$1`.
#[derive(Debug, Default)]
pub struct Params(Vec<Value>);

impl Params {
    /// Binds the provided [`Value`] as the next parameter, returning its
    /// [`Placeholder`].
    pub fn bind(&mut self, val: Value) -> Placeholder {
        self.0.push(val);
        Placeholder(self.0.len())
    }

    /// Returns the bound parameters in the form accepted by a
    /// [`Connection`].
    ///
    /// [`Connection`]: super::Connection
    #[must_use]
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.0
            .iter()
            .map(|v| -> &(dyn ToSql + Sync) { &**v })
            .collect()
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no parameters are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Position of a bound parameter, rendered as `$N`.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("${_0}")]
pub struct Placeholder(usize);

/// Single SQL condition or assignment with its not yet bound values.
///
/// Every [`MARKER`] in the template is replaced with a [`Placeholder`] of the
/// next value on rendering.
#[derive(Debug)]
struct Clause {
    /// Template of this [`Clause`].
    template: &'static str,

    /// Values to bind in place of the [`MARKER`]s.
    values: Vec<Value>,
}

impl Clause {
    /// Renders this [`Clause`] binding its values into the provided
    /// [`Params`].
    fn render(self, params: &mut Params) -> String {
        let mut values = self.values.into_iter();
        let mut parts = self.template.split(MARKER);
        let mut sql = parts.next().unwrap_or_default().to_owned();
        for part in parts {
            if let Some(val) = values.next() {
                sql.push_str(&params.bind(val).to_string());
            }
            sql.push_str(part);
        }
        sql
    }
}

/// Ordered accumulator of SQL [`Clause`]s, rendered into a [`Statement`]
/// fragment at the end, once the final parameter positions are known.
#[derive(Debug, Default)]
pub struct Clauses(Vec<Clause>);

impl Clauses {
    /// Appends a new clause out of the provided `template` and `values` bound
    /// in place of its [`MARKER`]s.
    pub fn push(
        &mut self,
        template: &'static str,
        values: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        let values = values.into_iter().collect::<Vec<_>>();
        debug_assert_eq!(
            template.matches(MARKER).count(),
            values.len(),
            "every marker of `{template}` should have a value",
        );
        self.0.push(Clause { template, values });
        self
    }

    /// Indicates whether no clauses were pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders these [`Clauses`] prefixed with the provided `keyword` and
    /// joined by the `separator`, binding their values into the [`Params`]
    /// in order.
    ///
    /// Empty [`Clauses`] render into an empty string.
    #[must_use]
    pub fn render(
        self,
        keyword: &str,
        separator: &str,
        params: &mut Params,
    ) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!(
            "{keyword} {}",
            self.0
                .into_iter()
                .map(|clause| clause.render(params))
                .join(separator),
        )
    }
}

#[cfg(test)]
mod spec {
    use super::{value, Clauses, Params};

    #[test]
    fn empty_clauses_render_nothing() {
        let mut params = Params::default();

        assert_eq!(Clauses::default().render("WHERE", " AND ", &mut params), "");
        assert!(params.is_empty());
    }

    #[test]
    fn numbers_placeholders_in_order() {
        let mut params = Params::default();
        let offset = params.bind(value(0_i32));

        let mut clauses = Clauses::default();
        _ = clauses
            .push("a = $?::INT4", [value(1_i32)])
            .push("b BETWEEN $?::INT4 AND $?::INT4", [value(2_i32), value(3_i32)])
            .push("c IS NOT NULL", []);
        let sql = clauses.render("WHERE", " AND ", &mut params);

        assert_eq!(offset.to_string(), "$1");
        assert_eq!(
            sql,
            "WHERE a = $2::INT4 AND b BETWEEN $3::INT4 AND $4::INT4 \
             AND c IS NOT NULL",
        );
        assert_eq!(params.len(), 4);
        assert_eq!(format!("{:?}", params.as_refs()), "[0, 1, 2, 3]");
    }
}
