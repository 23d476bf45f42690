//! GraphQL documents sent to the events backend.

macro_rules! listing_fields {
    () => {
        r#"
      id
      start_date
      end_date
      is_cancelled
      available_booking_slots
      max_booking_slots
      is_highlighted
      participants_aggregate {
        aggregate {
          count
        }
      }
      class {
        id
        name
        description
        image_url
        location_name
        location_city
        location_country
        event_type
        url_slug
        class_teachers {
          teacher {
            id
            name
            url_slug
            images {
              image {
                url
              }
              is_profile_picture
            }
          }
          is_owner
        }
        booking_categories {
          id
          name
          description
          booking_options {
            id
            price
            currency
            title
            subtitle
          }
        }
      }
"#
    };
}

/// Upcoming, non-cancelled occurrences of classes that have an image.
pub const GET_FEATURED_EVENTS: &str = concat!(
    r#"query GetFeaturedEvents($limit: Int = 6) {
  class_events(
    where: {
      end_date: { _gte: "now" }
      is_cancelled: { _eq: false }
      class: { id: { _is_null: false }, image_url: { _is_null: false } }
    }
    order_by: { start_date: asc }
    limit: $limit
  ) {"#,
    listing_fields!(),
    "  }\n}\n"
);

pub const GET_UPCOMING_EVENTS: &str = concat!(
    r#"query GetUpcomingEvents($limit: Int = 6) {
  class_events(
    where: {
      end_date: { _gte: "now" }
      is_cancelled: { _eq: false }
      class: { id: { _is_null: false } }
    }
    order_by: { start_date: asc }
    limit: $limit
  ) {"#,
    listing_fields!(),
    "  }\n}\n"
);

pub const GET_CLASS_BY_SLUG: &str = r#"query GetClassBySlug($slug: String!) {
  classes(where: { url_slug: { _eq: $slug } }, limit: 1) {
    id
    name
    description
    image_url
    location_name
    location_city
    location_country
    event_type
    url_slug
    class_teachers {
      teacher {
        id
        name
        url_slug
        images {
          image {
            url
          }
          is_profile_picture
        }
      }
      is_owner
    }
    booking_categories {
      id
      name
      description
      booking_options {
        id
        price
        currency
        title
        subtitle
      }
    }
  }
}
"#;

pub const GET_EVENT_OCCURRENCES_BY_CLASS: &str = r#"query GetEventOccurrencesByClass($classId: uuid!, $limit: Int = 50) {
  class_events(
    where: {
      class_id: { _eq: $classId }
      end_date: { _gte: "now" }
      is_cancelled: { _eq: false }
    }
    order_by: { start_date: asc }
    limit: $limit
  ) {
    id
    start_date
    end_date
    is_cancelled
    available_booking_slots
    max_booking_slots
    is_highlighted
    class {
      id
      name
      description
      image_url
      location_name
      location_city
      location_country
      event_type
      url_slug
    }
  }
}
"#;
