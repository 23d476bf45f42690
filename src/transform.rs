//! Maps raw API records to the shapes served to the frontend.

use crate::models::{
    BookingCategory, BookingOption, Category, ClassDetails, ClassSummary, Event, EventOccurrence,
    Slots, TeacherLabel, TeacherSummary,
};
use crate::records::{
    BookingCategoryRecord, ClassRecord, ClassTeacherRecord, OccurrenceRecord, TeacherImageRecord,
    TeacherRecord,
};

pub const UNKNOWN_TEACHER: &str = "Unknown Teacher";
pub const LOCATION_TBD: &str = "Location TBD";
pub const NO_DESCRIPTION: &str = "No description available";
pub const DEFAULT_CURRENCY: &str = "USD";

impl Category {
    pub fn from_event_type(event_type: Option<&str>) -> Self {
        match event_type.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("festival") => Category::Festival,
            Some("workshop") => Category::Workshop,
            _ => Category::Class,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Venue name, else "city, country" with blanks dropped, else a placeholder.
pub fn format_location(
    name: Option<&str>,
    city: Option<&str>,
    country: Option<&str>,
) -> String {
    if let Some(name) = non_blank(name) {
        return name.to_string();
    }
    let parts: Vec<&str> = [city, country].into_iter().filter_map(non_blank).collect();
    if parts.is_empty() {
        LOCATION_TBD.to_string()
    } else {
        parts.join(", ")
    }
}

/// Owner with a usable name, else the first teacher with one.
fn lead_teacher(class_teachers: &[ClassTeacherRecord]) -> Option<&TeacherRecord> {
    let named = || {
        class_teachers.iter().filter_map(|ct| {
            ct.teacher
                .as_ref()
                .filter(|teacher| non_blank(teacher.name.as_deref()).is_some())
                .map(|teacher| (ct.is_owner, teacher))
        })
    };
    named()
        .find(|(is_owner, _)| *is_owner)
        .or_else(|| named().next())
        .map(|(_, teacher)| teacher)
}

/// Profile picture, else the first image with a url.
fn teacher_image(teacher: &TeacherRecord) -> Option<String> {
    let url_of = |image: &TeacherImageRecord| {
        image
            .image
            .as_ref()
            .and_then(|img| non_blank(img.url.as_deref()))
            .map(str::to_string)
    };
    teacher
        .images
        .iter()
        .filter(|image| image.is_profile_picture)
        .find_map(url_of)
        .or_else(|| teacher.images.iter().find_map(url_of))
}

pub fn teacher_label(class_teachers: &[ClassTeacherRecord]) -> TeacherLabel {
    match lead_teacher(class_teachers) {
        Some(teacher) => TeacherLabel {
            name: non_blank(teacher.name.as_deref())
                .unwrap_or(UNKNOWN_TEACHER)
                .to_string(),
            image_url: teacher_image(teacher),
        },
        None => TeacherLabel {
            name: UNKNOWN_TEACHER.to_string(),
            image_url: None,
        },
    }
}

fn class_summary(class: &ClassRecord) -> ClassSummary {
    ClassSummary {
        id: class.id.clone(),
        name: class.name.clone(),
        description: class.description.clone(),
        image_url: non_blank(class.image_url.as_deref()).map(str::to_string),
        location_name: non_blank(class.location_name.as_deref()).map(str::to_string),
        location_city: non_blank(class.location_city.as_deref()).map(str::to_string),
        location_country: non_blank(class.location_country.as_deref()).map(str::to_string),
        event_type: class.event_type.clone(),
        url_slug: class.url_slug.clone(),
    }
}

fn participants(record: &OccurrenceRecord) -> u32 {
    record
        .participants_aggregate
        .as_ref()
        .and_then(|agg| agg.aggregate.as_ref())
        .and_then(|agg| agg.count)
        .unwrap_or(0)
}

pub fn occurrence_from_record(record: &OccurrenceRecord) -> EventOccurrence {
    let class = record.class.clone().unwrap_or_default();
    EventOccurrence {
        id: record.id.clone(),
        start_date: record.start_date.clone().unwrap_or_default(),
        end_date: record.end_date.clone().unwrap_or_default(),
        is_cancelled: record.is_cancelled,
        is_highlighted: record.is_highlighted,
        slots: Slots::from_pair(record.available_booking_slots, record.max_booking_slots),
        participants_count: participants(record),
        class: class_summary(&class),
    }
}

pub fn event_from_record(record: &OccurrenceRecord) -> Event {
    let occurrence = occurrence_from_record(record);
    let class = record.class.clone().unwrap_or_default();

    let first_option = class
        .booking_categories
        .first()
        .and_then(|category| category.booking_options.first());
    let price = first_option.and_then(|option| option.price);
    let currency = price.map(|_| {
        first_option
            .and_then(|option| non_blank(option.currency.as_deref()))
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string()
    });

    Event {
        is_bookable: occurrence.is_bookable(),
        title: class.name.clone(),
        description: non_blank(class.description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        location: format_location(
            class.location_name.as_deref(),
            class.location_city.as_deref(),
            class.location_country.as_deref(),
        ),
        teacher: teacher_label(&class.class_teachers),
        category: Category::from_event_type(class.event_type.as_deref()),
        is_highlighted: occurrence.is_highlighted,
        price,
        currency,
        image_url: occurrence.class.image_url.clone(),
        slots: occurrence.slots,
        participants_count: occurrence.participants_count,
        id: occurrence.id,
        start_date: occurrence.start_date,
        end_date: occurrence.end_date,
    }
}

fn booking_category(record: &BookingCategoryRecord) -> BookingCategory {
    BookingCategory {
        id: record.id.clone(),
        name: record.name.clone(),
        description: record.description.clone(),
        options: record
            .booking_options
            .iter()
            .map(|option| BookingOption {
                id: option.id.clone(),
                price: option.price,
                currency: option.currency.clone(),
                title: option.title.clone(),
                subtitle: option.subtitle.clone(),
            })
            .collect(),
    }
}

pub fn class_details_from_record(record: &ClassRecord) -> ClassDetails {
    let teachers = record
        .class_teachers
        .iter()
        .filter_map(|ct| {
            let teacher = ct.teacher.as_ref()?;
            Some(TeacherSummary {
                id: teacher.id.clone(),
                name: non_blank(teacher.name.as_deref())
                    .unwrap_or(UNKNOWN_TEACHER)
                    .to_string(),
                url_slug: teacher.url_slug.clone(),
                image_url: teacher_image(teacher),
                is_owner: ct.is_owner,
            })
        })
        .collect();

    ClassDetails {
        id: record.id.clone(),
        name: record.name.clone(),
        description: non_blank(record.description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        image_url: non_blank(record.image_url.as_deref()).map(str::to_string),
        location_name: record.location_name.clone(),
        location_city: record.location_city.clone(),
        location_country: record.location_country.clone(),
        location: format_location(
            record.location_name.as_deref(),
            record.location_city.as_deref(),
            record.location_country.as_deref(),
        ),
        event_type: record.event_type.clone(),
        category: Category::from_event_type(record.event_type.as_deref()),
        url_slug: record.url_slug.clone().unwrap_or_default(),
        teachers,
        booking_categories: record.booking_categories.iter().map(booking_category).collect(),
    }
}
