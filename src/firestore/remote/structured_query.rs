use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::firestore::api::query::{CollectionSelector, Filter, Filters, Query};
use crate::firestore::error::{serialization_error, FirestoreResult};
use crate::firestore::value::ScalarValue;

/// Encodes the full `runQuery` body: `{"structuredQuery": {...}}`.
pub(crate) fn encode_query(query: &Query) -> FirestoreResult<String> {
    serde_json::to_string(query).map_err(|err| serialization_error(format!("Failed to encode query: {err}")))
}

/// Encodes a filter clause on its own; an empty clause is an error.
pub(crate) fn encode_filters(filters: &Filters) -> FirestoreResult<String> {
    serde_json::to_string(filters).map_err(|err| serialization_error(format!("Failed to encode filters: {err}")))
}

#[derive(Serialize)]
struct RunQueryRequest<'a> {
    #[serde(rename = "structuredQuery")]
    structured_query: StructuredQuery<'a>,
}

#[derive(Serialize)]
struct StructuredQuery<'a> {
    from: &'a [CollectionSelector],
    #[serde(rename = "where", skip_serializing_if = "has_no_filters")]
    filters: &'a Filters,
}

fn has_no_filters(filters: &&Filters) -> bool {
    filters.is_empty()
}

#[derive(Serialize)]
struct FieldFilterEnvelope<'a> {
    #[serde(rename = "fieldFilter")]
    field_filter: FieldFilterBody<'a>,
}

#[derive(Serialize)]
struct FieldFilterBody<'a> {
    field: FieldReference<'a>,
    op: &'static str,
    value: &'a ScalarValue,
}

#[derive(Serialize)]
struct FieldReference<'a> {
    #[serde(rename = "fieldPath")]
    field_path: &'a str,
}

#[derive(Serialize)]
struct CompositeFilterEnvelope<'a> {
    #[serde(rename = "compositeFilter")]
    composite_filter: CompositeFilterBody<'a>,
}

#[derive(Serialize)]
struct CompositeFilterBody<'a> {
    op: &'static str,
    filters: &'a [Filter],
}

impl Serialize for Query {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RunQueryRequest {
            structured_query: StructuredQuery {
                from: self.selectors(),
                filters: self.filters(),
            },
        }
        .serialize(serializer)
    }
}

impl Serialize for Filter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        FieldFilterEnvelope {
            field_filter: FieldFilterBody {
                field: FieldReference {
                    field_path: self.field(),
                },
                op: self.operator().as_str(),
                value: self.value(),
            },
        }
        .serialize(serializer)
    }
}

impl Serialize for Filters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_slice() {
            [] => Err(S::Error::custom(
                "filters of a query with no filters must not be encoded",
            )),
            [single] => single.serialize(serializer),
            many => CompositeFilterEnvelope {
                composite_filter: CompositeFilterBody {
                    op: "AND",
                    filters: many,
                },
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::api::query::FilterOperator;
    use crate::firestore::error::FirestoreErrorCode;
    use chrono::{TimeZone, Utc};

    #[test]
    fn single_filter_is_bare_field_filter() {
        let query = Query::from_collection("coll1").filter("abc", FilterOperator::GreaterThanOrEqual, 1_i64);
        assert_eq!(
            encode_query(&query).unwrap(),
            r#"{"structuredQuery":{"from":[{"collectionId":"coll1","allDescendants":false}],"where":{"fieldFilter":{"field":{"fieldPath":"abc"},"op":"GREATER_THAN_OR_EQUAL","value":{"integerValue":"1"}}}}}"#
        );
    }

    #[test]
    fn no_filters_omits_where() {
        let query = Query::from_collection("coll1");
        assert_eq!(
            encode_query(&query).unwrap(),
            r#"{"structuredQuery":{"from":[{"collectionId":"coll1","allDescendants":false}]}}"#
        );
    }

    #[test]
    fn many_filters_use_and_composite() {
        let query = Query::from_collection("coll1")
            .filter("abc", FilterOperator::GreaterThanOrEqual, 1_i64)
            .filter("xyz", FilterOperator::GreaterThanOrEqual, 2_i64);
        assert_eq!(
            encode_query(&query).unwrap(),
            r#"{"structuredQuery":{"from":[{"collectionId":"coll1","allDescendants":false}],"where":{"compositeFilter":{"op":"AND","filters":[{"fieldFilter":{"field":{"fieldPath":"abc"},"op":"GREATER_THAN_OR_EQUAL","value":{"integerValue":"1"}}},{"fieldFilter":{"field":{"fieldPath":"xyz"},"op":"GREATER_THAN_OR_EQUAL","value":{"integerValue":"2"}}}]}}}}"#
        );
    }

    #[test]
    fn empty_filters_alone_fail_to_encode() {
        let err = encode_filters(&Filters::default()).unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::Serialization);
    }

    #[test]
    fn encodes_each_scalar_kind() {
        let instant = Utc.with_ymd_and_hms(2019, 12, 20, 15, 0, 0).unwrap();
        let filters = Filters::new(vec![
            Filter::new("name", FilterOperator::Equal, "A"),
            Filter::new("on", FilterOperator::Equal, true),
            Filter::new("endDate", FilterOperator::GreaterThan, instant),
        ]);
        assert_eq!(
            encode_filters(&filters).unwrap(),
            r#"{"compositeFilter":{"op":"AND","filters":[{"fieldFilter":{"field":{"fieldPath":"name"},"op":"EQUAL","value":{"stringValue":"A"}}},{"fieldFilter":{"field":{"fieldPath":"on"},"op":"EQUAL","value":{"booleanValue":true}}},{"fieldFilter":{"field":{"fieldPath":"endDate"},"op":"GREATER_THAN","value":{"timestampValue":"2019-12-20T15:00:00Z"}}}]}}"#
        );
    }
}
