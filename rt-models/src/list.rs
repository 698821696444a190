//! Paginated collection responses.
//!
//! List endpoints return `{ has_next, next, previous, page, per_page,
//! results: [...] }`. `results` is always present after hydration (an
//! absent key becomes an empty list) and every entry is hydrated through an
//! item factory supplied by the concrete list type.

use serde_json::Value;

use crate::model::{flag, hydrate_list_with, Computed, DynamicModel, Model, Shape, GENERIC};
use crate::value::{Attributes, FieldValue};

/// Hydrates one `results` entry.
pub type ItemFactory = fn(Value) -> DynamicModel;

pub(crate) const RESULTS: &str = "results";
const HAS_NEXT: &str = "has_next";

fn has_next_get(attrs: &Attributes) -> FieldValue {
    FieldValue::from(attrs.get(HAS_NEXT).and_then(FieldValue::as_bool).unwrap_or(false))
}

fn has_next_set(attrs: &mut Attributes, value: FieldValue) {
    attrs.insert(HAS_NEXT, flag(&value));
}

/// Computed fields shared by every list shape.
pub const LIST_COMPUTED: &[Computed] = &[Computed {
    name: "hasNext",
    get: has_next_get,
    set: Some(has_next_set),
}];

/// Fields a list may write even when absent.
pub const LIST_WRITABLE: &[&str] = &["page", "per_page"];

/// Default `results` to an empty list, then hydrate each entry with `item`.
pub fn hydrate_results(attrs: &mut Attributes, item: ItemFactory) {
    hydrate_list_with(attrs, RESULTS, item);
    if !matches!(attrs.get(RESULTS), Some(FieldValue::List(_))) {
        attrs.insert(RESULTS, FieldValue::List(Vec::new()));
    }
}

fn generic_item(value: Value) -> DynamicModel {
    DynamicModel::from_value(GENERIC, value)
}

fn generic_results(attrs: &mut Attributes) {
    hydrate_results(attrs, generic_item);
}

/// Pagination accessors shared by list responses.
pub trait Paginated: Model {
    /// True iff `has_next` is present and truthy.
    fn has_next(&self) -> bool {
        self.as_model().get_bool("hasNext").unwrap_or(false)
    }

    /// Store `has_next` as 0/1.
    fn set_has_next(&mut self, value: bool) {
        self.as_model_mut().set("hasNext", value);
    }

    fn next(&self) -> Option<&str> {
        self.as_model().get_str("next")
    }

    fn previous(&self) -> Option<&str> {
        self.as_model().get_str("previous")
    }

    fn page(&self) -> Option<i64> {
        self.as_model().get_i64("page")
    }

    fn per_page(&self) -> Option<i64> {
        self.as_model().get_i64("per_page")
    }

    /// Hydrated result entries.
    fn result_models(&self) -> Vec<&DynamicModel> {
        self.as_model().objects(RESULTS).collect()
    }

    fn result_count(&self) -> usize {
        self.as_model()
            .attributes()
            .get(RESULTS)
            .and_then(FieldValue::as_list)
            .map_or(0, <[FieldValue]>::len)
    }

    /// Result entries converted to the item type `M`.
    fn results_as<M: Model>(&self) -> Vec<M> {
        self.as_model()
            .objects(RESULTS)
            .cloned()
            .map(M::from_model)
            .collect()
    }
}

model_type!(
    /// Generic paginated list whose entries are untyped objects unless an
    /// item factory is supplied.
    ListModel,
    &Shape {
        name: "list",
        writable: LIST_WRITABLE,
        computed: LIST_COMPUTED,
        init: generic_results,
        omit_when_empty: &[],
    }
);

impl ListModel {
    /// List with generic entries.
    pub fn new(raw: Value) -> Self {
        Self::from_value(raw)
    }

    /// List whose entries are hydrated by `item`.
    pub fn with_items(raw: Value, item: ItemFactory) -> Self {
        let mut model = DynamicModel::from_value(CUSTOM_ITEMS, raw);
        hydrate_results(model.attributes_mut(), item);
        Self(model)
    }
}

fn deferred_results(_: &mut Attributes) {}

/// `ListModel`'s shape with hydration left to the caller-supplied factory.
const CUSTOM_ITEMS: &Shape = &Shape {
    init: deferred_results,
    ..*ListModel::SHAPE
};

impl Paginated for ListModel {}
