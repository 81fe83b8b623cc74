use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use timetable::scheduling::{SchedulingService, Term, TermId, Venue, VenueId};

#[derive(Clone)]
pub(crate) struct ApiState {
    pub(crate) service: Arc<SchedulingService>,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Venues and terms the service boots with, matching the institution's
/// standing catalog. Everything else arrives via the API or a roster
/// import.
pub(crate) fn seed_defaults(service: &SchedulingService) -> Result<(), timetable::error::AppError> {
    let venues = [
        ("Downtown Campus", "bg-blue-500"),
        ("North Campus", "bg-emerald-500"),
        ("Riverside", "bg-amber-500"),
        ("Harbor Annex", "bg-pink-500"),
        ("Hillside", "bg-cyan-500"),
        ("Online - Regional", "bg-purple-500"),
    ];
    for (index, (name, color)) in venues.into_iter().enumerate() {
        service.upsert_venue(Venue {
            id: VenueId(index as u32 + 1),
            name: name.to_string(),
            color: color.to_string(),
        })?;
    }

    service.upsert_term(Term {
        id: TermId(1),
        name: "First Term 2026".to_string(),
        year: 2026,
        number: 1,
        active: true,
    });
    service.upsert_term(Term {
        id: TermId(2),
        name: "Second Term 2026".to_string(),
        year: 2026,
        number: 2,
        active: false,
    });
    Ok(())
}
