//! Derived joined views over a snapshot.
//!
//! All views are pure functions with left-join semantics: the left side
//! always appears, and an unmatched right side is `None`. Snapshot
//! validation already rejects dangling foreign keys, so a `None` here means
//! the optional side genuinely has no row (a user with no trips, a pin with
//! no visit record), not a broken reference.

use std::collections::HashMap;

use crate::engine::snapshot::Snapshot;
use crate::models::{InterestArea, MapPin, Place, Trip, User, VisitRecord};

/// user ⋈ interest
#[derive(Debug, Clone, Copy)]
pub struct UserInterestRow<'a> {
    pub user: &'a User,
    pub interest: Option<&'a InterestArea>,
}

/// user ⋈ trip
#[derive(Debug, Clone, Copy)]
pub struct UserTripRow<'a> {
    pub user: &'a User,
    pub trip: Option<&'a Trip>,
}

/// pin ⋈ place
#[derive(Debug, Clone, Copy)]
pub struct PinPlaceRow<'a> {
    pub pin: &'a MapPin,
    pub place: Option<&'a Place>,
}

/// (pin ⋈ place) ⋈ record
#[derive(Debug, Clone, Copy)]
pub struct PinPlaceRecordRow<'a> {
    pub pin: &'a MapPin,
    pub place: Option<&'a Place>,
    pub record: Option<&'a VisitRecord>,
}

/// record → place projection used for rating aggregation
#[derive(Debug, Clone, Copy)]
pub struct RecordPlaceRow<'a> {
    pub record: &'a VisitRecord,
    pub place_name: Option<&'a str>,
}

/// One row of the full per-user history view
/// (user × trip × pin × place × record)
#[derive(Debug, Clone, Copy)]
pub struct UserHistoryRow<'a> {
    pub user: &'a User,
    pub trip: Option<&'a Trip>,
    pub pin: Option<&'a MapPin>,
    pub place: Option<&'a Place>,
    pub record: Option<&'a VisitRecord>,
}

fn place_index(snapshot: &Snapshot) -> HashMap<&str, &Place> {
    snapshot
        .places
        .iter()
        .map(|p| (p.place_name.as_str(), p))
        .collect()
}

fn pins_by_trip(snapshot: &Snapshot) -> HashMap<i64, Vec<&MapPin>> {
    let mut index: HashMap<i64, Vec<&MapPin>> = HashMap::new();
    for pin in &snapshot.pins {
        index.entry(pin.trip_id).or_default().push(pin);
    }
    index
}

fn records_by_pin(snapshot: &Snapshot) -> HashMap<i64, Vec<&VisitRecord>> {
    let mut index: HashMap<i64, Vec<&VisitRecord>> = HashMap::new();
    for record in &snapshot.records {
        index.entry(record.pin_id).or_default().push(record);
    }
    index
}

/// Every user appears; users without interests get a single `None` row.
pub fn user_interest_rows(snapshot: &Snapshot) -> Vec<UserInterestRow<'_>> {
    let mut rows = Vec::new();
    for user in &snapshot.users {
        let mut matched = false;
        for interest in snapshot.interests.iter().filter(|i| i.user_id == user.user_id) {
            matched = true;
            rows.push(UserInterestRow {
                user,
                interest: Some(interest),
            });
        }
        if !matched {
            rows.push(UserInterestRow {
                user,
                interest: None,
            });
        }
    }
    rows
}

/// Every user appears; users without trips get a single `None` row.
pub fn user_trip_rows(snapshot: &Snapshot) -> Vec<UserTripRow<'_>> {
    let mut rows = Vec::new();
    for user in &snapshot.users {
        let mut matched = false;
        for trip in snapshot.trips.iter().filter(|t| t.user_id == user.user_id) {
            matched = true;
            rows.push(UserTripRow {
                user,
                trip: Some(trip),
            });
        }
        if !matched {
            rows.push(UserTripRow { user, trip: None });
        }
    }
    rows
}

/// Resolves each pin to its place attributes.
pub fn pin_place_rows(snapshot: &Snapshot) -> Vec<PinPlaceRow<'_>> {
    let places = place_index(snapshot);
    snapshot
        .pins
        .iter()
        .map(|pin| PinPlaceRow {
            pin,
            place: places.get(pin.place_name.as_str()).copied(),
        })
        .collect()
}

/// Attaches visit records to each pin-place pairing; pins without records
/// keep a single row with `record: None`.
pub fn pin_place_record_rows(snapshot: &Snapshot) -> Vec<PinPlaceRecordRow<'_>> {
    let records = records_by_pin(snapshot);
    let mut rows = Vec::new();
    for pair in pin_place_rows(snapshot) {
        match records.get(&pair.pin.pin_id) {
            Some(matched) => {
                for &record in matched {
                    rows.push(PinPlaceRecordRow {
                        pin: pair.pin,
                        place: pair.place,
                        record: Some(record),
                    });
                }
            }
            None => rows.push(PinPlaceRecordRow {
                pin: pair.pin,
                place: pair.place,
                record: None,
            }),
        }
    }
    rows
}

/// Resolves each record to the place its pin points at.
pub fn record_place_rows(snapshot: &Snapshot) -> Vec<RecordPlaceRow<'_>> {
    let pin_places: HashMap<i64, &str> = snapshot
        .pins
        .iter()
        .map(|p| (p.pin_id, p.place_name.as_str()))
        .collect();

    snapshot
        .records
        .iter()
        .map(|record| RecordPlaceRow {
            record,
            place_name: pin_places.get(&record.pin_id).copied(),
        })
        .collect()
}

/// The full per-user history: every user appears, expanded through their
/// trips, each trip's pins, each pin's place and visit records. Pins resolve
/// to users through trip ownership.
pub fn user_history_rows(snapshot: &Snapshot) -> Vec<UserHistoryRow<'_>> {
    let places = place_index(snapshot);
    let pins = pins_by_trip(snapshot);
    let records = records_by_pin(snapshot);

    let mut rows = Vec::new();
    for user in &snapshot.users {
        let trips: Vec<&Trip> = snapshot
            .trips
            .iter()
            .filter(|t| t.user_id == user.user_id)
            .collect();

        if trips.is_empty() {
            rows.push(UserHistoryRow {
                user,
                trip: None,
                pin: None,
                place: None,
                record: None,
            });
            continue;
        }

        for trip in trips {
            let Some(trip_pins) = pins.get(&trip.trip_id) else {
                rows.push(UserHistoryRow {
                    user,
                    trip: Some(trip),
                    pin: None,
                    place: None,
                    record: None,
                });
                continue;
            };

            for &pin in trip_pins {
                let place = places.get(pin.place_name.as_str()).copied();
                match records.get(&pin.pin_id) {
                    Some(matched) => {
                        for &record in matched {
                            rows.push(UserHistoryRow {
                                user,
                                trip: Some(trip),
                                pin: Some(pin),
                                place,
                                record: Some(record),
                            });
                        }
                    }
                    None => rows.push(UserHistoryRow {
                        user,
                        trip: Some(trip),
                        pin: Some(pin),
                        place,
                        record: None,
                    }),
                }
            }
        }
    }
    rows
}
