use utoipa::OpenApi;

use crate::calendar::{DayIndicator, DotTone, IndicatorDot};
use crate::handlers::{CalendarResponse, EventListings, OccurrenceView, OccurrencesResponse};
use crate::models::{
    Availability, BookingCategory, BookingOption, Category, ClassDetails, ClassSummary, Event,
    EventOccurrence, OccurrenceStatus, Slots, TeacherLabel, TeacherSummary,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_events,
        crate::handlers::get_class,
        crate::handlers::get_occurrences,
        crate::handlers::get_calendar
    ),
    components(schemas(
        Event,
        EventOccurrence,
        ClassSummary,
        ClassDetails,
        TeacherLabel,
        TeacherSummary,
        BookingCategory,
        BookingOption,
        Category,
        Slots,
        OccurrenceStatus,
        Availability,
        DayIndicator,
        IndicatorDot,
        DotTone,
        EventListings,
        OccurrenceView,
        OccurrencesResponse,
        CalendarResponse
    )),
    tags(
        (name = "events", description = "Event listings, occurrence selection and calendar")
    ),
)]
pub struct ApiDoc;
