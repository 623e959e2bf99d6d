use std::collections::HashSet;

use crate::error::AppError;
use crate::models::{InterestArea, MapPin, Place, Trip, User, VisitRecord};

/// Referential-integrity violation found while validating a snapshot.
///
/// Join keys are checked once, at load time, so a mismatch fails fast with a
/// named diagnostic instead of silently producing empty joins downstream.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("interest_area {interest_id} references missing user {user_id}")]
    DanglingInterestUser { interest_id: i64, user_id: i64 },

    #[error("trip {trip_id} references missing user {user_id}")]
    DanglingTripUser { trip_id: i64, user_id: i64 },

    #[error("trip {trip_id} has start_date after end_date")]
    InvertedTripDates { trip_id: i64 },

    #[error("map_pin {pin_id} references missing trip {trip_id}")]
    DanglingPinTrip { pin_id: i64, trip_id: i64 },

    #[error("map_pin {pin_id} references missing place '{place_name}'")]
    DanglingPinPlace { pin_id: i64, place_name: String },

    #[error("record {record_id} references missing map_pin {pin_id}")]
    DanglingRecordPin { record_id: i64, pin_id: i64 },
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        AppError::Computation(err.to_string())
    }
}

/// Full in-memory copy of the six relations used for one scoring pass.
///
/// A snapshot is read-only for its lifetime; each request computes over its
/// own copy, so interleaved requests never observe partial updates.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub interests: Vec<InterestArea>,
    pub trips: Vec<Trip>,
    pub places: Vec<Place>,
    pub pins: Vec<MapPin>,
    pub records: Vec<VisitRecord>,
}

impl Snapshot {
    /// Looks up a user by id
    pub fn user(&self, user_id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// Stated interest labels of one user
    pub fn interests_of(&self, user_id: i64) -> Vec<&str> {
        self.interests
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| i.interest.as_str())
            .collect()
    }

    /// Checks that every foreign key resolves and trip dates are ordered
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let user_ids: HashSet<i64> = self.users.iter().map(|u| u.user_id).collect();
        let trip_ids: HashSet<i64> = self.trips.iter().map(|t| t.trip_id).collect();
        let place_names: HashSet<&str> =
            self.places.iter().map(|p| p.place_name.as_str()).collect();
        let pin_ids: HashSet<i64> = self.pins.iter().map(|p| p.pin_id).collect();

        for interest in &self.interests {
            if !user_ids.contains(&interest.user_id) {
                return Err(SnapshotError::DanglingInterestUser {
                    interest_id: interest.interest_id,
                    user_id: interest.user_id,
                });
            }
        }

        for trip in &self.trips {
            if !user_ids.contains(&trip.user_id) {
                return Err(SnapshotError::DanglingTripUser {
                    trip_id: trip.trip_id,
                    user_id: trip.user_id,
                });
            }
            if trip.start_date > trip.end_date {
                return Err(SnapshotError::InvertedTripDates {
                    trip_id: trip.trip_id,
                });
            }
        }

        for pin in &self.pins {
            if !trip_ids.contains(&pin.trip_id) {
                return Err(SnapshotError::DanglingPinTrip {
                    pin_id: pin.pin_id,
                    trip_id: pin.trip_id,
                });
            }
            if !place_names.contains(pin.place_name.as_str()) {
                return Err(SnapshotError::DanglingPinPlace {
                    pin_id: pin.pin_id,
                    place_name: pin.place_name.clone(),
                });
            }
        }

        for record in &self.records {
            if !pin_ids.contains(&record.pin_id) {
                return Err(SnapshotError::DanglingRecordPin {
                    record_id: record.record_id,
                    pin_id: record.pin_id,
                });
            }
        }

        Ok(())
    }
}
