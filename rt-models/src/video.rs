//! Video responses.

use chrono::{DateTime, NaiveDateTime};

use crate::common::{PgRating, Restrictions, Tag};
use crate::model::{hydrate_list, hydrate_object, Model, Shape};
use crate::value::Attributes;

model_type!(
    /// Author (channel) of a video: `id`, `name`, `avatar_url`.
    VideoAuthor,
    &Shape::plain("video_author")
);

model_type!(
    /// Video category: `id`, `name`, `category_url`.
    VideoCategory,
    &Shape::plain("video_category")
);

model_type!(VideoType, &Shape::plain("video_type"));

fn video_info_init(attrs: &mut Attributes) {
    hydrate_object(attrs, "author", VideoAuthor::SHAPE);
    hydrate_object(attrs, "category", VideoCategory::SHAPE);
    hydrate_object(attrs, "pg_rating", PgRating::SHAPE);
    hydrate_object(attrs, "restrictions", Restrictions::SHAPE);
    hydrate_list(attrs, "all_tags", Tag::SHAPE);
}

model_type!(
    /// Full information about an uploaded video.
    ///
    /// `all_tags` is always a list after hydration and is left out of the
    /// JSON projection when empty.
    VideoInfo,
    &Shape {
        init: video_info_init,
        omit_when_empty: &["all_tags"],
        ..Shape::plain("video_info")
    }
);

impl VideoInfo {
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn video_url(&self) -> Option<&str> {
        self.get_str("video_url")
    }

    pub fn is_hidden(&self) -> bool {
        self.get_bool("is_hidden").unwrap_or(false)
    }

    pub fn author(&self) -> Option<VideoAuthor> {
        self.object("author").cloned().map(VideoAuthor::from_model)
    }

    pub fn category(&self) -> Option<VideoCategory> {
        self.object("category").cloned().map(VideoCategory::from_model)
    }

    pub fn pg_rating(&self) -> Option<PgRating> {
        self.object("pg_rating").cloned().map(PgRating::from_model)
    }

    pub fn restrictions(&self) -> Option<Restrictions> {
        self.object("restrictions").cloned().map(Restrictions::from_model)
    }

    pub fn all_tags(&self) -> Vec<Tag> {
        self.objects("all_tags").cloned().map(Tag::from_model).collect()
    }
}

model_type!(
    /// Delayed publication of a video: `video`, `created`, `modified`,
    /// `timestamp`, `blocking_rule`.
    PublicationResponse,
    &Shape::plain("publication")
);

impl PublicationResponse {
    pub fn video(&self) -> Option<&str> {
        self.get_str("video")
    }

    /// When the video opens, accepting both the naive
    /// `YYYY-MM-DDTHH:MM:SS` form and RFC 3339.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.get_str("timestamp")?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "id": "9a4b1c",
            "title": "Evening news",
            "is_hidden": false,
            "author": {"id": 12, "name": "Channel One", "avatar_url": "https://pic.rutube.ru/a.jpg"},
            "category": {"id": 13, "name": "News", "category_url": "https://rutube.ru/news/"},
            "pg_rating": {"age": 16, "logo": "16+"},
            "restrictions": {"country": {"allowed": ["RU"]}},
            "all_tags": [{"id": 1, "name": "politics"}, {"id": 2, "name": "weather"}],
            "hashtags": ["news"]
        })
    }

    #[test]
    fn test_video_info_hydrates_nested_objects() {
        let video = VideoInfo::from_value(payload());
        assert_eq!(video.id(), Some("9a4b1c"));
        assert_eq!(video.title(), Some("Evening news"));
        assert!(!video.is_hidden());

        let author = video.author().unwrap();
        assert_eq!(author.shape().name, "video_author");
        assert_eq!(author.get_str("name"), Some("Channel One"));

        assert_eq!(video.category().unwrap().get_i64("id"), Some(13));
        assert_eq!(video.pg_rating().unwrap().get_i64("age"), Some(16));
        assert!(video.restrictions().unwrap().country().is_some());

        let tags: Vec<_> = video.all_tags().iter().map(|t| t.get_str("name").map(str::to_owned)).collect();
        assert_eq!(tags, vec![Some("politics".into()), Some("weather".into())]);
    }

    #[test]
    fn test_video_info_projection_roundtrip() {
        let video = VideoInfo::from_value(payload());
        assert_eq!(video.to_json(), payload());
    }

    #[test]
    fn test_video_info_without_tags() {
        let video = VideoInfo::from_value(json!({"id": "x", "all_tags": []}));
        assert!(video.all_tags().is_empty());
        assert!(video.get("all_tags").is_some());
        assert_eq!(video.to_json(), json!({"id": "x"}));

        let video = VideoInfo::from_value(json!({"id": "x"}));
        assert_eq!(video.to_json(), json!({"id": "x"}));
    }

    #[test]
    fn test_video_info_absent_nested_stays_absent() {
        let video = VideoInfo::from_value(json!({"id": "x", "author": null}));
        assert!(video.author().is_none());
        assert!(video.get("category").is_none());
        assert!(!video.is_set("author"));
    }

    #[test]
    fn test_publication_timestamp() {
        let publication = PublicationResponse::from_value(json!({
            "video": "9a4b1c",
            "timestamp": "2024-05-01T18:30:00"
        }));
        assert_eq!(publication.video(), Some("9a4b1c"));
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        assert_eq!(publication.timestamp(), Some(expected));

        let publication = PublicationResponse::from_value(json!({
            "timestamp": "2024-05-01T18:30:00+03:00"
        }));
        assert_eq!(publication.timestamp(), Some(expected));
    }
}
