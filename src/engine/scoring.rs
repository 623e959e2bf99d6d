use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::engine::{category, demographics, joins, similarity::cosine_similarity, Snapshot};
use crate::error::{AppError, AppResult};

/// Number of candidates kept in the ranked output
pub const TOP_K: usize = 5;

/// Number of most-similar raters feeding the collaborative term
const NEIGHBOR_COUNT: usize = 5;

/// Weights of the linear scoring model.
///
/// Externalized so tests (and future tuning) can substitute values without
/// touching the engine; the defaults are the production constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub similarity: f64,
    pub rating: f64,
    pub age: f64,
    pub interest: f64,
    pub season: f64,
    pub collaborative: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            rating: 0.5,
            age: 0.2,
            interest: 0.3,
            season: 0.2,
            collaborative: 0.3,
        }
    }
}

/// A scored candidate place
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlace {
    pub place_name: String,
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub score: f64,
}

/// Scores every place for one user and returns the ranked top candidates.
///
/// Candidates are all places in the snapshot (revisits may reappear). The
/// final score combines content similarity, average rating, age-group
/// popularity, interest-category match, season popularity and, when the user
/// has at least one rated visit, a collaborative-filtering term. Ranking is
/// a stable sort by score descending, so ties keep snapshot place order.
pub fn score_candidates(
    snapshot: &Snapshot,
    user_id: i64,
    weights: &ScoringWeights,
    today: NaiveDate,
) -> AppResult<Vec<ScoredPlace>> {
    let user = snapshot
        .user(user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let (_, user_group) = demographics::classify(user.birth_date.as_deref(), today);
    let user_interests: HashSet<&str> = snapshot.interests_of(user_id).into_iter().collect();

    let history = joins::user_history_rows(snapshot);

    // Visited-type proportions, compared against a one-hot type encoding
    let type_vocabulary: Vec<&str> = snapshot
        .places
        .iter()
        .map(|p| p.place_type.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let type_index: HashMap<&str, usize> = type_vocabulary
        .iter()
        .enumerate()
        .map(|(i, t)| (*t, i))
        .collect();

    let mut visited_type_counts: HashMap<&str, usize> = HashMap::new();
    for row in history.iter().filter(|r| r.user.user_id == user_id) {
        if let Some(place) = row.place {
            *visited_type_counts
                .entry(place.place_type.as_str())
                .or_insert(0) += 1;
        }
    }
    let visited_total: usize = visited_type_counts.values().sum();

    let mut user_type_vector = vec![0.0; type_vocabulary.len()];
    if visited_total > 0 {
        for (place_type, count) in &visited_type_counts {
            if let Some(&idx) = type_index.get(place_type) {
                user_type_vector[idx] = *count as f64 / visited_total as f64;
            }
        }
    }

    // Average rating per place
    let mut rating_sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for row in joins::record_place_rows(snapshot) {
        if let Some(place_name) = row.place_name {
            let entry = rating_sums.entry(place_name).or_insert((0.0, 0));
            entry.0 += row.record.rating;
            entry.1 += 1;
        }
    }
    let avg_ratings: HashMap<&str, f64> = rating_sums
        .into_iter()
        .map(|(name, (sum, n))| (name, sum / n as f64))
        .collect();

    // Visit counts among users of the same age group, via trips -> pins
    let peer_ids: HashSet<i64> = snapshot
        .users
        .iter()
        .filter(|u| demographics::classify(u.birth_date.as_deref(), today).1 == user_group)
        .map(|u| u.user_id)
        .collect();
    let trips_by_id: HashMap<i64, _> = snapshot.trips.iter().map(|t| (t.trip_id, t)).collect();

    let mut age_counts: HashMap<&str, usize> = HashMap::new();
    let mut season_counts: HashMap<&str, usize> = HashMap::new();
    let current_month = today.month();
    for pin in &snapshot.pins {
        let Some(trip) = trips_by_id.get(&pin.trip_id) else {
            continue;
        };
        if peer_ids.contains(&trip.user_id) {
            *age_counts.entry(pin.place_name.as_str()).or_insert(0) += 1;
        }
        // Season popularity: pins of trips starting in the current month
        if trip.start_date.month() == current_month {
            *season_counts.entry(pin.place_name.as_str()).or_insert(0) += 1;
        }
    }

    // Collaborative filtering over the user x place rating matrix
    let neighbor_means = collaborative_means(snapshot, user_id, &history);

    let mut scored: Vec<ScoredPlace> = Vec::with_capacity(snapshot.places.len());
    for place in &snapshot.places {
        let mut one_hot = vec![0.0; type_vocabulary.len()];
        if let Some(&idx) = type_index.get(place.place_type.as_str()) {
            one_hot[idx] = 1.0;
        }
        let similarity = cosine_similarity(&user_type_vector, &one_hot);

        let avg_rating = avg_ratings
            .get(place.place_name.as_str())
            .copied()
            .unwrap_or(0.0);

        let mut score = weights.similarity * similarity + weights.rating * avg_rating;

        let age_count = age_counts
            .get(place.place_name.as_str())
            .copied()
            .unwrap_or(0);
        score += weights.age * age_count as f64;

        if user_interests.contains(category::category_of(&place.place_type).as_str()) {
            score += weights.interest;
        }

        let season_count = season_counts
            .get(place.place_name.as_str())
            .copied()
            .unwrap_or(0);
        score += weights.season * season_count as f64;

        if let Some(means) = &neighbor_means {
            let mean = means.get(place.place_name.as_str()).copied().unwrap_or(0.0);
            score += weights.collaborative * mean;
        }

        scored.push(ScoredPlace {
            place_name: place.place_name.clone(),
            place_type: place.place_type.clone(),
            latitude: place.latitude,
            longitude: place.longitude,
            score,
        });
    }

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(TOP_K);

    Ok(scored)
}

/// Mean rating per place over the most similar other raters.
///
/// Returns `None` when the target user has no rated visit (or has no peers
/// to compare against), in which case the collaborative term is omitted from
/// the score rather than zero-filled.
fn collaborative_means<'a>(
    snapshot: &'a Snapshot,
    user_id: i64,
    history: &[joins::UserHistoryRow<'a>],
) -> Option<HashMap<&'a str, f64>> {
    // Mean rating per (user, place) cell; users rating the same place twice
    // collapse to their average.
    let mut cells: HashMap<(i64, &str), (f64, usize)> = HashMap::new();
    for row in history {
        if let (Some(place), Some(record)) = (row.place, row.record) {
            let entry = cells
                .entry((row.user.user_id, place.place_name.as_str()))
                .or_insert((0.0, 0));
            entry.0 += record.rating;
            entry.1 += 1;
        }
    }

    let rater_set: HashSet<i64> = cells.keys().map(|(uid, _)| *uid).collect();
    if !rater_set.contains(&user_id) {
        return None;
    }

    let place_order: Vec<&str> = snapshot
        .places
        .iter()
        .map(|p| p.place_name.as_str())
        .collect();
    let place_index: HashMap<&str, usize> = place_order
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i))
        .collect();

    // Dense rating rows in snapshot user order, missing entries zero
    let raters: Vec<i64> = snapshot
        .users
        .iter()
        .map(|u| u.user_id)
        .filter(|uid| rater_set.contains(uid))
        .collect();
    let mut rows: HashMap<i64, Vec<f64>> = raters
        .iter()
        .map(|uid| (*uid, vec![0.0; place_order.len()]))
        .collect();
    for ((uid, place_name), (sum, n)) in &cells {
        if let (Some(row), Some(&idx)) = (rows.get_mut(uid), place_index.get(place_name)) {
            row[idx] = sum / *n as f64;
        }
    }

    let target_row = rows.get(&user_id)?.clone();
    let mut similarities: Vec<(i64, f64)> = raters
        .iter()
        .filter(|uid| **uid != user_id)
        .map(|uid| (*uid, cosine_similarity(&target_row, &rows[uid])))
        .collect();
    if similarities.is_empty() {
        return None;
    }
    similarities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    similarities.truncate(NEIGHBOR_COUNT);

    let mut means: HashMap<&str, f64> = HashMap::new();
    for (idx, place_name) in place_order.iter().enumerate() {
        let sum: f64 = similarities.iter().map(|(uid, _)| rows[uid][idx]).sum();
        means.insert(*place_name, sum / similarities.len() as f64);
    }

    Some(means)
}
