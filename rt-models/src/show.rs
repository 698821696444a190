//! TV show responses and video-to-show relations.

use serde_json::{Map, Value};

use crate::common::{Country, Genre, PgRating};
use crate::list::{hydrate_results, Paginated, LIST_COMPUTED, LIST_WRITABLE};
use crate::model::{flag, hydrate_list, hydrate_object, item, Computed, DynamicModel, Model, Shape};
use crate::value::{Attributes, FieldValue};
use crate::video::VideoType;

model_type!(ShowType, &Shape::plain("show_type"));

const IS_ACTIVE: &str = "isActive";

fn is_active_get(attrs: &Attributes) -> FieldValue {
    FieldValue::from(attrs.get(IS_ACTIVE).and_then(FieldValue::as_bool).unwrap_or(false))
}

fn is_active_set(attrs: &mut Attributes, value: FieldValue) {
    attrs.insert(IS_ACTIVE, flag(&value));
}

fn show_info_init(attrs: &mut Attributes) {
    hydrate_object(attrs, "type", ShowType::SHAPE);
    hydrate_list(attrs, "countries", Country::SHAPE);
    hydrate_list(attrs, "genres", Genre::SHAPE);
}

model_type!(
    /// Information about a TV show.
    ///
    /// `isActive` is stored as 0/1; `countries` and `genres` are omitted
    /// from the JSON projection when empty.
    ShowInfo,
    &Shape {
        name: "show_info",
        writable: &[],
        computed: &[Computed {
            name: IS_ACTIVE,
            get: is_active_get,
            set: Some(is_active_set),
        }],
        init: show_info_init,
        omit_when_empty: &["countries", "genres"],
    }
);

impl ShowInfo {
    pub fn id(&self) -> Option<i64> {
        self.get_i64("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn is_active(&self) -> bool {
        self.get_bool(IS_ACTIVE).unwrap_or(false)
    }

    pub fn set_is_active(&mut self, value: bool) {
        self.set(IS_ACTIVE, value);
    }

    pub fn show_type(&self) -> Option<ShowType> {
        self.object("type").cloned().map(ShowType::from_model)
    }

    pub fn countries(&self) -> Vec<Country> {
        self.objects("countries").cloned().map(Country::from_model).collect()
    }

    pub fn genres(&self) -> Vec<Genre> {
        self.objects("genres").cloned().map(Genre::from_model).collect()
    }
}

fn show_list_init(attrs: &mut Attributes) {
    hydrate_results(attrs, item::<ShowInfo>);
}

model_type!(
    /// Page of TV shows.
    ShowList,
    &Shape {
        name: "show_list",
        writable: LIST_WRITABLE,
        computed: LIST_COMPUTED,
        init: show_list_init,
        omit_when_empty: &[],
    }
);

impl ShowList {
    pub fn results(&self) -> Vec<ShowInfo> {
        self.results_as()
    }
}

impl Paginated for ShowList {}

fn video_relation_init(attrs: &mut Attributes) {
    hydrate_object(attrs, "type", VideoType::SHAPE);
    hydrate_list(attrs, "age", PgRating::SHAPE);
}

model_type!(
    /// Show metadata attached to a video (season, episode, rights data).
    ///
    /// Used both as a response and as a request body, so every documented
    /// field is writable on a fresh instance.
    VideoRelation,
    &Shape {
        name: "video_relation",
        writable: &[
            "tv",
            "year",
            "video_id",
            "season",
            "episode",
            "show_page",
            "type",
            "release",
            "track_id",
            "ext_id",
            "fragment",
            "episode_global",
            "season_agreement",
            "episode_agreement",
            "name_agreement",
            "vc_version",
            "fts",
            "last_update_ts",
            "age",
            "asset_id",
        ],
        computed: &[],
        init: video_relation_init,
        omit_when_empty: &["age"],
    }
);

impl VideoRelation {
    /// Empty relation for `video_id`, ready to be filled and sent.
    pub fn for_video(video_id: &str) -> Self {
        let mut relation = Self::from_model(DynamicModel::with_shape(Self::SHAPE, Map::new()));
        relation.set("video_id", video_id);
        relation
    }

    pub fn video_id(&self) -> Option<&str> {
        self.get_str("video_id")
    }

    pub fn tv(&self) -> Option<&Value> {
        self.attributes().get("tv").and_then(FieldValue::as_raw)
    }

    pub fn season(&self) -> Option<i64> {
        self.get_i64("season")
    }

    pub fn episode(&self) -> Option<i64> {
        self.get_i64("episode")
    }

    pub fn ages(&self) -> Vec<PgRating> {
        self.objects("age").cloned().map(PgRating::from_model).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_show_info_hydration() {
        let show = ShowInfo::from_value(json!({
            "id": 501,
            "name": "Morning show",
            "type": {"id": 1, "name": "Series"},
            "countries": [{"id": 1, "name": "Russia"}],
            "genres": [],
            "isActive": 1
        }));
        assert_eq!(show.id(), Some(501));
        assert_eq!(show.show_type().unwrap().get_str("name"), Some("Series"));
        assert_eq!(show.countries().len(), 1);
        assert!(show.genres().is_empty());
        assert!(show.is_active());

        let projected = show.to_json();
        assert!(projected.get("countries").is_some());
        assert!(projected.get("genres").is_none());
    }

    #[test]
    fn test_show_info_is_active_flag() {
        let mut show = ShowInfo::from_value(json!({"id": 1}));
        assert!(!show.is_active());
        show.set_is_active(true);
        assert_eq!(show.attributes().get("isActive").and_then(FieldValue::as_i64), Some(1));
        assert!(show.is_active());
    }

    #[test]
    fn test_show_list_items_are_show_info() {
        let list = ShowList::from_value(json!({
            "has_next": 1,
            "page": 1,
            "per_page": 20,
            "results": [{"id": 7, "name": "Quiz", "countries": []}]
        }));
        assert!(list.has_next());
        assert_eq!(list.result_count(), 1);
        let shows = list.results();
        assert_eq!(shows[0].shape().name, "show_info");
        assert_eq!(shows[0].name(), Some("Quiz"));

        let projected = list.to_json();
        assert_eq!(projected["results"][0], json!({"id": 7, "name": "Quiz"}));
    }

    #[test]
    fn test_empty_show_list() {
        let list = ShowList::from_value(json!({}));
        assert!(list.results().is_empty());
        assert!(!list.has_next());
    }

    #[test]
    fn test_video_relation_declared_fields_writable() {
        let mut relation = VideoRelation::for_video("9a4b1c");
        assert!(relation.set("season", 2));
        assert!(relation.set("episode", 5));
        assert!(relation.set("tv", json!({"id": 501})));
        assert!(!relation.set("not_a_field", 1));

        assert_eq!(relation.video_id(), Some("9a4b1c"));
        assert_eq!(relation.season(), Some(2));
        assert_eq!(relation.tv(), Some(&json!({"id": 501})));
        assert_eq!(
            relation.to_json(),
            json!({"video_id": "9a4b1c", "season": 2, "episode": 5, "tv": {"id": 501}})
        );
    }

    #[test]
    fn test_video_relation_age_hydration() {
        let relation = VideoRelation::from_value(json!({
            "video_id": "abc",
            "type": {"id": 2},
            "age": [{"age": 12}]
        }));
        assert_eq!(relation.ages().len(), 1);
        assert_eq!(relation.ages()[0].shape().name, "pg_rating");
        assert!(relation.object("type").is_some());
    }
}
