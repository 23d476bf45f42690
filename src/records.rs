//! Raw records as returned by the GraphQL API.
//!
//! Every field tolerates being missing or `null` so that a sparse record never
//! fails the whole response.

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageRecord {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeacherImageRecord {
    pub image: Option<ImageRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_profile_picture: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeacherRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub name: Option<String>,
    pub url_slug: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<TeacherImageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassTeacherRecord {
    pub teacher: Option<TeacherRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_owner: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingOptionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingCategoryRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_options: Vec<BookingOptionRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location_name: Option<String>,
    pub location_city: Option<String>,
    pub location_country: Option<String>,
    pub event_type: Option<String>,
    pub url_slug: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub class_teachers: Vec<ClassTeacherRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_categories: Vec<BookingCategoryRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AggregateCount {
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParticipantsAggregate {
    pub aggregate: Option<AggregateCount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OccurrenceRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_cancelled: bool,
    pub available_booking_slots: Option<u32>,
    pub max_booking_slots: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_highlighted: bool,
    pub participants_aggregate: Option<ParticipantsAggregate>,
    pub class: Option<ClassRecord>,
}

/// `data` of the occurrence list and listing queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassEventsData {
    #[serde(deserialize_with = "null_as_default")]
    pub class_events: Vec<OccurrenceRecord>,
}

/// `data` of the class-by-slug query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassesData {
    #[serde(deserialize_with = "null_as_default")]
    pub classes: Vec<ClassRecord>,
}
