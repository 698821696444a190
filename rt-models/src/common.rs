//! Small reference objects shared by video and show responses.

use crate::model::{hydrate_object, Model, Shape};
use crate::value::Attributes;

model_type!(
    /// Age rating (`age`, `pg_rating` fields).
    PgRating,
    &Shape::plain("pg_rating")
);

model_type!(
    /// A tag attached to a video.
    Tag,
    &Shape::plain("tag")
);

model_type!(Country, &Shape::plain("country"));

model_type!(Genre, &Shape::plain("genre"));

model_type!(
    /// Country allow/deny lists for playback.
    CountryRestriction,
    &Shape::plain("country_restriction")
);

fn restrictions_init(attrs: &mut Attributes) {
    hydrate_object(attrs, "country", CountryRestriction::SHAPE);
}

model_type!(
    /// Playback restrictions of a video.
    Restrictions,
    &Shape {
        init: restrictions_init,
        ..Shape::plain("restrictions")
    }
);

impl Restrictions {
    pub fn country(&self) -> Option<CountryRestriction> {
        self.object("country").cloned().map(CountryRestriction::from_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_restrictions_hydrate_country() {
        let restrictions = Restrictions::from_value(json!({
            "country": {"allowed": ["RU"], "restricted": []}
        }));
        let country = restrictions.country().unwrap();
        assert_eq!(country.shape().name, "country_restriction");
        assert_eq!(
            country.get("allowed").unwrap().as_raw(),
            Some(&json!(["RU"]))
        );
    }

    #[test]
    fn test_restrictions_without_country() {
        let restrictions = Restrictions::from_value(json!({}));
        assert!(restrictions.country().is_none());
        assert_eq!(restrictions.to_json(), json!({}));
    }
}
