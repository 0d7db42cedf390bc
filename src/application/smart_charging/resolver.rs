//! Composite schedule engine
//!
//! Resolves the charging profiles installed on a connector into one
//! unambiguous, time-ordered limit curve for a requested window. Pure and
//! synchronous: the engine only reads the snapshot it is handed and
//! allocates a fresh result, so identical inputs always produce an
//! identical schedule.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::config::ChargingConfig;
use crate::domain::charging_profile::{
    ChargingProfile, ChargingProfilePurpose, ProfileView, DEFAULT_NUMBER_PHASES,
};
use crate::domain::error::{ResolveError, ResolveWarning};
use crate::domain::units::{ChargingRateUnit, RateConverter};

use super::recurrence;

/// Caller's request for a composite schedule.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub connector_id: u32,
    /// Absolute start of the requested window.
    pub window_start: DateTime<Utc>,
    /// Window length; must be positive.
    pub duration: Duration,
    /// Output unit; the configured default when absent.
    pub rate_unit: Option<ChargingRateUnit>,
    /// Transaction currently running on the connector, if any.
    pub active_transaction_id: Option<i32>,
}

/// One resolved output segment, effective until the next period's start (or
/// the schedule's end for the last one).
///
/// Serializes with durations as integer milliseconds, for audit logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPeriod {
    /// Offset from the window start.
    #[serde(serialize_with = "duration_as_ms")]
    pub start_offset: Duration,
    /// Effective limit in the resolved unit. `None` means no profile
    /// constrains this stretch and the hardware's own maximum governs.
    pub limit: Option<f64>,
    pub number_phases: u32,
}

/// The merged limit curve for the requested window.
///
/// Periods cover `[0, duration)` exactly: sorted, gap-free, no duplicate
/// boundaries, adjacent periods always differ in limit or phase count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSchedule {
    pub rate_unit: ChargingRateUnit,
    #[serde(serialize_with = "duration_as_ms")]
    pub duration: Duration,
    pub periods: Vec<ResolvedPeriod>,
}

fn duration_as_ms<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.num_milliseconds())
}

/// Successful resolution: the schedule plus non-fatal findings.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub schedule: ResolvedSchedule,
    pub warnings: Vec<ResolveWarning>,
}

/// A winning profile's expanded, unit-converted segments.
struct PurposeTrack {
    purpose: ChargingProfilePurpose,
    profile_id: i32,
    segments: Vec<TrackSegment>,
}

/// Half-open `[start_ms, end_ms)` with the limit already in the output unit.
struct TrackSegment {
    start_ms: i64,
    end_ms: i64,
    limit: f64,
    number_phases: u32,
    /// Profile's `minChargingRate` converted with this segment's phase count.
    min_rate: f64,
}

impl PurposeTrack {
    fn covering(&self, lo: i64, hi: i64) -> Option<&TrackSegment> {
        // Cut points include every segment edge, so a segment either covers
        // the whole sub-interval or none of it.
        self.segments
            .iter()
            .find(|s| s.start_ms <= lo && s.end_ms >= hi)
    }
}

/// Resolves composite schedules against a profile snapshot.
pub struct CompositeScheduleEngine {
    config: ChargingConfig,
}

impl CompositeScheduleEngine {
    pub fn new(config: ChargingConfig) -> Self {
        Self { config }
    }

    /// Resolve the composite schedule for one request.
    ///
    /// Malformed profiles are excluded and reported as warnings; a required
    /// unit conversion that cannot be performed aborts the whole call, since
    /// a schedule in the wrong unit is unsafe to act on.
    pub fn resolve(
        &self,
        request: &ScheduleRequest,
        view: &dyn ProfileView,
    ) -> Result<Resolution, ResolveError> {
        let window_ms = request.duration.num_milliseconds();
        if window_ms <= 0 {
            return Err(ResolveError::NonPositiveDuration);
        }
        let out_unit = request.rate_unit.unwrap_or(self.config.default_rate_unit);
        let converter = RateConverter::new(&self.config);
        let window_end = request.window_start + request.duration;

        let snapshot = view.profiles_for(request.connector_id, request.active_transaction_id);
        debug!(
            connector_id = request.connector_id,
            window_start = %request.window_start,
            duration_s = request.duration.num_seconds(),
            profiles = snapshot.len(),
            "resolving composite schedule"
        );

        let mut warnings = Vec::new();
        let mut applicable: Vec<&ChargingProfile> = Vec::new();
        for profile in &snapshot {
            if let Err(violation) = profile.validate() {
                warn!(
                    profile_id = profile.id,
                    %violation,
                    "excluding malformed charging profile"
                );
                warnings.push(ResolveWarning::ProfileExcluded {
                    profile_id: profile.id,
                    violation,
                });
                continue;
            }
            if !profile.applies_to_transaction(request.active_transaction_id) {
                continue;
            }
            if !profile.validity_intersects(request.window_start, window_end) {
                continue;
            }
            applicable.push(profile);
        }

        let mut tracks: Vec<PurposeTrack> = Vec::new();
        for purpose in ChargingProfilePurpose::ALL {
            let Some(winner) = effective_profile(&applicable, purpose, request.active_transaction_id)
            else {
                continue;
            };
            let segments = recurrence::expand(winner, request.window_start, window_ms);
            if segments.is_empty() {
                continue;
            }
            let schedule = &winner.schedule;
            let mut converted = Vec::with_capacity(segments.len());
            for segment in segments {
                let limit = converter.convert(
                    segment.limit,
                    schedule.rate_unit,
                    out_unit,
                    segment.number_phases,
                )?;
                let min_rate = if schedule.min_charging_rate > 0.0 {
                    converter.convert(
                        schedule.min_charging_rate,
                        schedule.rate_unit,
                        out_unit,
                        segment.number_phases,
                    )?
                } else {
                    0.0
                };
                converted.push(TrackSegment {
                    start_ms: segment.start_ms,
                    end_ms: segment.end_ms,
                    limit,
                    number_phases: segment.number_phases,
                    min_rate,
                });
            }
            tracks.push(PurposeTrack {
                purpose,
                profile_id: winner.id,
                segments: converted,
            });
        }

        let periods = self.merge(&tracks, window_ms, &mut warnings);

        Ok(Resolution {
            schedule: ResolvedSchedule {
                rate_unit: out_unit,
                duration: request.duration,
                periods,
            },
            warnings,
        })
    }

    /// Steps 4–8: cut the window at every segment boundary, take the binding
    /// limit per sub-interval, apply minChargingRate floors, coalesce.
    fn merge(
        &self,
        tracks: &[PurposeTrack],
        window_ms: i64,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Vec<ResolvedPeriod> {
        let mut boundaries: BTreeSet<i64> = BTreeSet::new();
        boundaries.insert(0);
        boundaries.insert(window_ms);
        for track in tracks {
            for segment in &track.segments {
                if segment.start_ms > 0 && segment.start_ms < window_ms {
                    boundaries.insert(segment.start_ms);
                }
                if segment.end_ms > 0 && segment.end_ms < window_ms {
                    boundaries.insert(segment.end_ms);
                }
            }
        }

        let track_for = |purpose: ChargingProfilePurpose| {
            tracks.iter().find(|t| t.purpose == purpose)
        };
        let station_max = track_for(ChargingProfilePurpose::ChargePointMaxProfile);
        let tx_default = track_for(ChargingProfilePurpose::TxDefaultProfile);
        let tx = track_for(ChargingProfilePurpose::TxProfile);

        let cuts: Vec<i64> = boundaries.into_iter().collect();
        let mut periods: Vec<ResolvedPeriod> = Vec::new();
        for pair in cuts.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);

            // The station-wide maximum always caps; the transaction-level
            // constraint comes from the TxProfile where one covers the
            // sub-interval, otherwise from the TxDefaultProfile. A purpose
            // with no covering period contributes no constraint.
            let cap = station_max.and_then(|t| t.covering(lo, hi));
            let tx_level = tx
                .and_then(|t| t.covering(lo, hi).map(|s| (s, t.profile_id)))
                .or_else(|| tx_default.and_then(|t| t.covering(lo, hi).map(|s| (s, t.profile_id))));

            let mut contributors: Vec<(&TrackSegment, i32)> = Vec::new();
            if let (Some(segment), Some(track)) = (cap, station_max) {
                contributors.push((segment, track.profile_id));
            }
            if let Some((segment, profile_id)) = tx_level {
                contributors.push((segment, profile_id));
            }

            let mut limit = None;
            let mut number_phases = DEFAULT_NUMBER_PHASES;
            if !contributors.is_empty() {
                let mut computed = f64::INFINITY;
                for (segment, _) in &contributors {
                    if segment.limit < computed {
                        computed = segment.limit;
                        number_phases = segment.number_phases;
                    }
                }
                let (floor, floor_profile) = contributors
                    .iter()
                    .map(|(segment, profile_id)| (segment.min_rate, *profile_id))
                    .fold((0.0f64, 0), |acc, item| if item.0 > acc.0 { item } else { acc });

                let mut value = computed;
                if floor > computed {
                    warn!(
                        profile_id = floor_profile,
                        floor,
                        computed,
                        start_offset_s = lo / 1000,
                        "minChargingRate floor exceeds computed limit"
                    );
                    warnings.push(ResolveWarning::MinimumExceedsComputedLimit {
                        profile_id: floor_profile,
                        start_offset: Duration::milliseconds(lo),
                        floor,
                        computed,
                    });
                    value = floor;
                    // The floor must never push the output past the
                    // station-wide cap.
                    if let Some(cap) = cap {
                        value = value.min(cap.limit);
                    }
                }
                limit = Some(value);
            }

            periods.push(ResolvedPeriod {
                start_offset: Duration::milliseconds(lo),
                limit,
                number_phases,
            });
        }

        // Coalesce adjacent sub-intervals with identical output.
        let mut coalesced: Vec<ResolvedPeriod> = Vec::new();
        for period in periods {
            match coalesced.last() {
                Some(last)
                    if last.limit == period.limit && last.number_phases == period.number_phases => {}
                _ => coalesced.push(period),
            }
        }
        coalesced
    }
}

/// Pick the one profile of `purpose` that governs: highest stack level wins
/// outright, ties prefer a transaction-specific match, then the lowest id.
fn effective_profile<'a>(
    applicable: &[&'a ChargingProfile],
    purpose: ChargingProfilePurpose,
    active_transaction_id: Option<i32>,
) -> Option<&'a ChargingProfile> {
    let specificity = |p: &ChargingProfile| -> u8 {
        u8::from(p.transaction_id.is_some() && p.transaction_id == active_transaction_id)
    };
    applicable
        .iter()
        .filter(|p| p.purpose == purpose)
        .min_by(|a, b| {
            b.stack_level
                .cmp(&a.stack_level)
                .then_with(|| specificity(b).cmp(&specificity(a)))
                .then_with(|| a.id.cmp(&b.id))
        })
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charging_profile::{
        ChargingProfileKind, ChargingSchedule, ChargingSchedulePeriod, InMemoryProfileView,
        RecurrencyKind,
    };
    use crate::domain::error::ProfileInvariantViolation;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap()
    }

    fn engine() -> CompositeScheduleEngine {
        CompositeScheduleEngine::new(ChargingConfig::new(230.0, ChargingRateUnit::Watts))
    }

    fn request(duration: Duration) -> ScheduleRequest {
        ScheduleRequest {
            connector_id: 1,
            window_start: t0(),
            duration,
            rate_unit: None,
            active_transaction_id: None,
        }
    }

    fn watts_profile(
        id: i32,
        purpose: ChargingProfilePurpose,
        stack_level: i32,
        kind: ChargingProfileKind,
        start_schedule: Option<DateTime<Utc>>,
        duration: Option<Duration>,
        limit: f64,
    ) -> ChargingProfile {
        ChargingProfile {
            id,
            stack_level,
            purpose,
            kind,
            valid_from: None,
            valid_to: None,
            transaction_id: None,
            schedule: ChargingSchedule {
                rate_unit: ChargingRateUnit::Watts,
                periods: vec![ChargingSchedulePeriod::new(Duration::zero(), limit)],
                duration,
                start_schedule,
                min_charging_rate: 0.0,
            },
        }
    }

    fn station_max(id: i32, limit: f64) -> ChargingProfile {
        watts_profile(
            id,
            ChargingProfilePurpose::ChargePointMaxProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            limit,
        )
    }

    fn view(profiles: Vec<ChargingProfile>) -> InMemoryProfileView {
        let mut view = InMemoryProfileView::new();
        for profile in profiles {
            view.install(1, profile);
        }
        view
    }

    fn starts_and_limits(schedule: &ResolvedSchedule) -> Vec<(i64, Option<f64>)> {
        schedule
            .periods
            .iter()
            .map(|p| (p.start_offset.num_hours(), p.limit))
            .collect()
    }

    #[test]
    fn empty_snapshot_is_fully_unconstrained() {
        let resolution = engine()
            .resolve(&request(Duration::hours(24)), &view(vec![]))
            .unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, None)]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn resolve_is_deterministic() {
        let v = view(vec![
            station_max(11, 999_999.0),
            watts_profile(
                1,
                ChargingProfilePurpose::TxDefaultProfile,
                1,
                ChargingProfileKind::Recurring(RecurrencyKind::Daily),
                Some(t0() + Duration::hours(17)),
                Some(Duration::hours(3)),
                2000.0,
            ),
        ]);
        let req = request(Duration::hours(24));
        let first = engine().resolve(&req, &v).unwrap();
        let second = engine().resolve(&req, &v).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn day_profile_under_station_max() {
        // TxDefault 2000 W from 17:00 to 20:00 daily, station max 999999 W
        // all day: the station max fills the hours the day profile leaves
        // open, and the overlap takes the smaller limit.
        let v = view(vec![
            station_max(11, 999_999.0),
            watts_profile(
                1,
                ChargingProfilePurpose::TxDefaultProfile,
                1,
                ChargingProfileKind::Recurring(RecurrencyKind::Daily),
                Some(t0() + Duration::hours(17)),
                Some(Duration::hours(3)),
                2000.0,
            ),
        ]);
        let resolution = engine().resolve(&request(Duration::hours(24)), &v).unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![
                (0, Some(999_999.0)),
                (17, Some(2000.0)),
                (20, Some(999_999.0)),
            ]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn recurring_profile_alone_leaves_unconstrained_gaps() {
        let v = view(vec![watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Recurring(RecurrencyKind::Daily),
            Some(t0()),
            Some(Duration::minutes(1080)),
            2000.0,
        )]);
        let resolution = engine().resolve(&request(Duration::hours(48)), &v).unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![
                (0, Some(2000.0)),
                (18, None),
                (24, Some(2000.0)),
                (42, None),
            ]
        );
    }

    #[test]
    fn output_periods_cover_the_window_in_order() {
        let v = view(vec![
            station_max(11, 11_000.0),
            watts_profile(
                1,
                ChargingProfilePurpose::TxDefaultProfile,
                1,
                ChargingProfileKind::Recurring(RecurrencyKind::Daily),
                Some(t0() + Duration::hours(17)),
                Some(Duration::hours(3)),
                2000.0,
            ),
        ]);
        let resolution = engine().resolve(&request(Duration::hours(48)), &v).unwrap();
        let periods = &resolution.schedule.periods;
        assert_eq!(periods[0].start_offset, Duration::zero());
        for pair in periods.windows(2) {
            assert!(pair[0].start_offset < pair[1].start_offset);
            assert!(pair[1].start_offset < resolution.schedule.duration);
            // Coalescing left no redundant boundary behind.
            assert!(
                pair[0].limit != pair[1].limit
                    || pair[0].number_phases != pair[1].number_phases
            );
        }
    }

    #[test]
    fn tx_profile_overrides_tx_default() {
        let mut tx_default = watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            1000.0,
        );
        // A lower default limit and a higher floor must both lose to the
        // transaction profile.
        tx_default.schedule.min_charging_rate = 4000.0;
        let mut tx = watts_profile(
            2,
            ChargingProfilePurpose::TxProfile,
            1,
            ChargingProfileKind::Relative,
            None,
            None,
            3000.0,
        );
        tx.transaction_id = Some(42);

        let mut req = request(Duration::hours(4));
        req.active_transaction_id = Some(42);
        let resolution = engine().resolve(&req, &view(vec![tx_default, tx])).unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(3000.0))]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn higher_stack_level_fully_shadows_lower() {
        let all_day = watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            1000.0,
        );
        let one_hour = watts_profile(
            2,
            ChargingProfilePurpose::TxDefaultProfile,
            2,
            ChargingProfileKind::Absolute,
            Some(t0()),
            Some(Duration::hours(1)),
            5000.0,
        );
        let resolution = engine()
            .resolve(&request(Duration::hours(24)), &view(vec![all_day, one_hour]))
            .unwrap();
        // The shadowed stack-1 limit must not blend in, not even in the
        // hours the winner leaves open.
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(5000.0)), (1, None)]
        );
    }

    #[test]
    fn equal_stack_level_resolved_by_lowest_id() {
        let v = view(vec![
            watts_profile(
                9,
                ChargingProfilePurpose::TxDefaultProfile,
                1,
                ChargingProfileKind::Absolute,
                Some(t0()),
                None,
                1000.0,
            ),
            watts_profile(
                3,
                ChargingProfilePurpose::TxDefaultProfile,
                1,
                ChargingProfileKind::Absolute,
                Some(t0()),
                None,
                2000.0,
            ),
        ]);
        let resolution = engine().resolve(&request(Duration::hours(2)), &v).unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(2000.0))]
        );
    }

    #[test]
    fn min_charging_rate_floors_the_computed_limit() {
        let mut profile = watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            300.0,
        );
        profile.schedule.min_charging_rate = 500.0;
        let resolution = engine()
            .resolve(&request(Duration::hours(1)), &view(vec![profile]))
            .unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(500.0))]
        );
        assert_eq!(
            resolution.warnings,
            vec![ResolveWarning::MinimumExceedsComputedLimit {
                profile_id: 1,
                start_offset: Duration::zero(),
                floor: 500.0,
                computed: 300.0,
            }]
        );
    }

    #[test]
    fn floor_never_exceeds_the_station_cap() {
        let mut tx = watts_profile(
            2,
            ChargingProfilePurpose::TxProfile,
            1,
            ChargingProfileKind::Relative,
            None,
            None,
            300.0,
        );
        tx.transaction_id = Some(7);
        tx.schedule.min_charging_rate = 500.0;

        let mut req = request(Duration::hours(1));
        req.active_transaction_id = Some(7);
        let resolution = engine()
            .resolve(&req, &view(vec![station_max(11, 400.0), tx]))
            .unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(400.0))]
        );
        // The inconsistency is still reported even though the cap won.
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn malformed_profile_is_excluded_not_fatal() {
        let mut malformed = watts_profile(
            5,
            ChargingProfilePurpose::TxDefaultProfile,
            3,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            100.0,
        );
        malformed.schedule.periods = vec![
            ChargingSchedulePeriod::new(Duration::hours(1), 100.0),
            ChargingSchedulePeriod::new(Duration::hours(1), 200.0),
        ];
        let resolution = engine()
            .resolve(
                &request(Duration::hours(2)),
                &view(vec![malformed, station_max(11, 7000.0)]),
            )
            .unwrap();
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(7000.0))]
        );
        assert_eq!(
            resolution.warnings,
            vec![ResolveWarning::ProfileExcluded {
                profile_id: 5,
                violation: ProfileInvariantViolation::UnsortedPeriods { index: 1 },
            }]
        );
    }

    #[test]
    fn nan_limit_profile_is_excluded_and_never_reaches_the_output() {
        // A NaN limit compares false against everything, so if it slipped
        // past validation it would leave the running minimum at infinity.
        let poisoned = watts_profile(
            5,
            ChargingProfilePurpose::TxDefaultProfile,
            3,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            f64::NAN,
        );
        let resolution = engine()
            .resolve(&request(Duration::hours(2)), &view(vec![poisoned]))
            .unwrap();
        assert_eq!(starts_and_limits(&resolution.schedule), vec![(0, None)]);
        for period in &resolution.schedule.periods {
            assert!(period.limit.map_or(true, f64::is_finite));
        }
        assert_eq!(
            resolution.warnings,
            vec![ResolveWarning::ProfileExcluded {
                profile_id: 5,
                violation: ProfileInvariantViolation::NonFiniteLimit { index: 0 },
            }]
        );
    }

    #[test]
    fn resolved_schedule_serializes_with_millisecond_offsets() {
        let resolution = engine()
            .resolve(&request(Duration::hours(1)), &view(vec![station_max(11, 7000.0)]))
            .unwrap();
        let json = serde_json::to_value(&resolution.schedule).unwrap();
        assert_eq!(json["rateUnit"], "W");
        assert_eq!(json["duration"], 3_600_000);
        assert_eq!(json["periods"][0]["startOffset"], 0);
        assert_eq!(json["periods"][0]["limit"], 7000.0);
    }

    #[test]
    fn limits_are_converted_to_the_requested_unit() {
        let mut amps = watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            16.0,
        );
        amps.schedule.rate_unit = ChargingRateUnit::Amps;

        let mut req = request(Duration::hours(1));
        req.rate_unit = Some(ChargingRateUnit::Watts);
        let resolution = engine().resolve(&req, &view(vec![amps])).unwrap();
        // 16 A * 230 V * 3 phases
        assert_eq!(
            starts_and_limits(&resolution.schedule),
            vec![(0, Some(11_040.0))]
        );
        assert_eq!(resolution.schedule.rate_unit, ChargingRateUnit::Watts);
    }

    #[test]
    fn missing_voltage_aborts_when_conversion_is_required() {
        let engine = CompositeScheduleEngine::new(ChargingConfig::without_voltage(
            ChargingRateUnit::Watts,
        ));
        let mut amps = watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            16.0,
        );
        amps.schedule.rate_unit = ChargingRateUnit::Amps;

        let err = engine
            .resolve(&request(Duration::hours(1)), &view(vec![amps]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnitConversion(_)));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let err = engine()
            .resolve(&request(Duration::zero()), &view(vec![]))
            .unwrap_err();
        assert_eq!(err, ResolveError::NonPositiveDuration);
    }

    #[test]
    fn expired_profile_is_ignored() {
        let mut expired = watts_profile(
            1,
            ChargingProfilePurpose::TxDefaultProfile,
            1,
            ChargingProfileKind::Absolute,
            Some(t0()),
            None,
            2000.0,
        );
        expired.valid_to = Some(t0() - Duration::days(1));
        let resolution = engine()
            .resolve(&request(Duration::hours(1)), &view(vec![expired]))
            .unwrap();
        assert_eq!(starts_and_limits(&resolution.schedule), vec![(0, None)]);
    }
}
