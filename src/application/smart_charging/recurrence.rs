//! Recurrence expansion
//!
//! Turns one charging profile into the concrete time segments where its
//! schedule applies inside a requested window, expressed as millisecond
//! offsets into `[0, window)`. Absolute profiles yield a single occurrence at
//! `startSchedule`, Relative profiles a single occurrence at the window
//! start, Recurring profiles one occurrence per calendar cycle anchored at
//! `startSchedule`. Everything is clipped to the profile's validity bounds
//! and the request window.

use chrono::{DateTime, Utc};

use crate::domain::charging_profile::{ChargingProfile, ChargingProfileKind};

/// One contiguous stretch of applicability of a single profile period.
///
/// Half-open `[start_ms, end_ms)`, relative to the request window start.
/// The limit is still in the profile's native rate unit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProfileSegment {
    pub start_ms: i64,
    pub end_ms: i64,
    pub limit: f64,
    pub number_phases: u32,
}

/// Expand `profile` over the window `[window_start, window_start + window_ms)`.
///
/// The returned segments are sorted by start and pairwise disjoint: within
/// one occurrence the periods are strictly ordered, and an occurrence never
/// exceeds one recurrence cycle, so a segment can never silently span a
/// cycle boundary.
pub(crate) fn expand(
    profile: &ChargingProfile,
    window_start: DateTime<Utc>,
    window_ms: i64,
) -> Vec<ProfileSegment> {
    let rel_ms = |t: DateTime<Utc>| (t - window_start).num_milliseconds();

    // Applicability bounds from the validity window, clipped to the request.
    let clip_lo = profile.valid_from.map(rel_ms).unwrap_or(0).max(0);
    let clip_hi = profile.valid_to.map(rel_ms).unwrap_or(window_ms).min(window_ms);
    if clip_lo >= clip_hi {
        return Vec::new();
    }

    let schedule = &profile.schedule;
    let duration_ms = schedule.duration.map(|d| d.num_milliseconds());

    // (occurrence start, occurrence span; None = open-ended)
    let occurrences: Vec<(i64, Option<i64>)> = match profile.kind {
        ChargingProfileKind::Absolute => {
            // validate() guarantees start_schedule for Absolute/Recurring.
            let anchor = schedule.start_schedule.map(rel_ms).unwrap_or(0);
            vec![(anchor, duration_ms)]
        }
        ChargingProfileKind::Relative => vec![(0, duration_ms)],
        ChargingProfileKind::Recurring(recurrency) => {
            let cycle = recurrency.cycle().num_milliseconds();
            let anchor = schedule.start_schedule.map(rel_ms).unwrap_or(0);
            // Without an explicit duration the schedule runs until the next
            // cycle starts; with one it still never exceeds the cycle.
            let span = duration_ms.map_or(cycle, |d| d.min(cycle));

            let mut starts = Vec::new();
            // First cycle index whose occurrence could reach into the window.
            let mut k = (clip_lo - anchor - span).div_euclid(cycle).max(0);
            loop {
                let occurrence_start = anchor + k * cycle;
                if occurrence_start >= clip_hi {
                    break;
                }
                if occurrence_start + span > clip_lo {
                    starts.push((occurrence_start, Some(span)));
                }
                k += 1;
            }
            starts
        }
    };

    let mut segments = Vec::new();
    for (occurrence_start, span) in occurrences {
        let occurrence_end = span.map(|s| occurrence_start + s);
        for (index, period) in schedule.periods.iter().enumerate() {
            let period_start = occurrence_start + period.start_offset.num_milliseconds();
            let period_end = schedule
                .periods
                .get(index + 1)
                .map(|next| occurrence_start + next.start_offset.num_milliseconds());

            let start = period_start.max(clip_lo);
            let mut end = clip_hi;
            if let Some(e) = period_end {
                end = end.min(e);
            }
            if let Some(e) = occurrence_end {
                end = end.min(e);
            }
            if start < end {
                segments.push(ProfileSegment {
                    start_ms: start,
                    end_ms: end,
                    limit: period.limit,
                    number_phases: period.phases(),
                });
            }
        }
    }
    segments
}
