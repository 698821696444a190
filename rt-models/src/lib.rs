//! Rutube Models - Attribute-backed response objects.
//!
//! Every API response is hydrated into a `DynamicModel`: an ordered field
//! map whose behavior (writable fields, computed accessors, nested
//! hydration, JSON projection) is described by a static `Shape`. Concrete
//! response types are thin newtypes over `DynamicModel` implementing
//! `Model`; paginated responses additionally implement `Paginated`.

#[macro_use]
mod macros;

pub mod common;
pub mod list;
pub mod model;
pub mod show;
pub mod value;
pub mod video;

pub use common::{Country, CountryRestriction, Genre, PgRating, Restrictions, Tag};
pub use list::{ItemFactory, ListModel, Paginated};
pub use model::{item, Computed, DynamicModel, Model, Shape, GENERIC};
pub use show::{ShowInfo, ShowList, ShowType, VideoRelation};
pub use value::{Attributes, FieldValue};
pub use video::{PublicationResponse, VideoAuthor, VideoCategory, VideoInfo, VideoType};
