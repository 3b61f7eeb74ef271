use serde::Serialize;

use crate::firestore::error::FirestoreResult;
use crate::firestore::remote::structured_query::{encode_filters, encode_query};
use crate::firestore::value::ScalarValue;

/// Identifies the collection(s) a query scans.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    collection_id: String,
    all_descendants: bool,
}

impl CollectionSelector {
    pub fn new(collection_id: impl Into<String>, all_descendants: bool) -> Self {
        Self {
            collection_id: collection_id.into(),
            all_descendants,
        }
    }

    /// Selects the direct children collection named `collection_id`.
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self::new(collection_id, false)
    }

    /// Selects every collection named `collection_id`, at any depth.
    pub fn collection_group(collection_id: impl Into<String>) -> Self {
        Self::new(collection_id, true)
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn all_descendants(&self) -> bool {
        self.all_descendants
    }
}

/// Comparison operators supported by field filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::LessThan => "LESS_THAN",
            FilterOperator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            FilterOperator::GreaterThan => "GREATER_THAN",
            FilterOperator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            FilterOperator::Equal => "EQUAL",
        }
    }
}

/// A single comparison predicate on one document field.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    field: String,
    operator: FilterOperator,
    value: ScalarValue,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<ScalarValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &ScalarValue {
        &self.value
    }
}

/// Filters combined with an implicit AND, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters(Vec<Filter>);

impl Filters {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    pub fn push(&mut self, filter: Filter) {
        self.0.push(filter);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Filter] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.0.iter()
    }

    /// Encodes the filter clause on its own.
    ///
    /// Fails with a serialization error for an empty set: an absent clause is
    /// expressed by omitting `where` from the query, never by an empty filter.
    pub fn to_json(&self) -> FirestoreResult<String> {
        encode_filters(self)
    }
}

impl From<Vec<Filter>> for Filters {
    fn from(filters: Vec<Filter>) -> Self {
        Self(filters)
    }
}

impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A structured query: the collections to scan and the filters to apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    from: Vec<CollectionSelector>,
    filters: Filters,
}

impl Query {
    pub fn new(selector: CollectionSelector) -> Self {
        Self::from_parts(vec![selector], Filters::default())
    }

    pub fn from_parts(from: Vec<CollectionSelector>, filters: Filters) -> Self {
        Self { from, filters }
    }

    /// Query over the direct children collection named `collection_id`.
    pub fn from_collection(collection_id: impl Into<String>) -> Self {
        Self::new(CollectionSelector::collection(collection_id))
    }

    /// Query over every collection named `collection_id`, at any depth.
    pub fn collection_group(collection_id: impl Into<String>) -> Self {
        Self::new(CollectionSelector::collection_group(collection_id))
    }

    pub fn with_selector(mut self, selector: CollectionSelector) -> Self {
        self.from.push(selector);
        self
    }

    /// Appends a filter; every filter must match for a document to be returned.
    pub fn filter(mut self, field: impl Into<String>, operator: FilterOperator, value: impl Into<ScalarValue>) -> Self {
        self.filters.push(Filter::new(field, operator, value));
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn selectors(&self) -> &[CollectionSelector] {
        &self.from
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Encodes the `runQuery` request body.
    pub fn to_json(&self) -> FirestoreResult<String> {
        encode_query(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_filter_order() {
        let query = Query::from_collection("coll1")
            .filter("abc", FilterOperator::GreaterThanOrEqual, 1_i64)
            .filter("xyz", FilterOperator::Equal, "on");
        let fields: Vec<_> = query.filters().iter().map(Filter::field).collect();
        assert_eq!(fields, vec!["abc", "xyz"]);
        assert_eq!(query.selectors(), &[CollectionSelector::collection("coll1")]);
    }

    #[test]
    fn operator_wire_names() {
        assert_eq!(FilterOperator::LessThan.as_str(), "LESS_THAN");
        assert_eq!(FilterOperator::LessThanOrEqual.as_str(), "LESS_THAN_OR_EQUAL");
        assert_eq!(FilterOperator::GreaterThan.as_str(), "GREATER_THAN");
        assert_eq!(FilterOperator::GreaterThanOrEqual.as_str(), "GREATER_THAN_OR_EQUAL");
        assert_eq!(FilterOperator::Equal.as_str(), "EQUAL");
    }

    #[test]
    fn collection_group_scans_descendants() {
        let query = Query::collection_group("landmarks");
        assert!(query.selectors()[0].all_descendants());
    }
}
