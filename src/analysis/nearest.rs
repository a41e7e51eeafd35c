//! Nearest-neighbor pairing by great-circle distance.
//!
//! Every person is compared against every other person, so the search is
//! quadratic in the number of people. It is meant for small collections and
//! deliberately has no spatial index.

use super::geo::haversine_distance;
use crate::core::{Geo, Person, ValidationError};

/// A person paired with their closest neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborPair<'a> {
    pub person: &'a Person,
    pub neighbor: &'a Person,
    pub distance_meters: f64,
}

/// For every person, the closest other person.
///
/// `result[i]` is the neighbor of `people[i]`. Fewer than two people yield an
/// empty result rather than one entry per person. Ties go to the candidate
/// that comes first in `people`.
///
/// # Errors
///
/// With two or more people, every person must carry a valid position; the
/// first person without one is reported. A person whose identifier is shared
/// by everyone else has no eligible neighbor and is reported too.
pub fn find_closest_users(people: &[Person]) -> Result<Vec<&Person>, ValidationError> {
    Ok(find_closest_pairs(people)?
        .into_iter()
        .map(|pair| pair.neighbor)
        .collect())
}

/// Same search as [`find_closest_users`], keeping the distance.
pub fn find_closest_pairs(people: &[Person]) -> Result<Vec<NeighborPair<'_>>, ValidationError> {
    if people.len() < 2 {
        return Ok(Vec::new());
    }

    let positions = people
        .iter()
        .map(validated_position)
        .collect::<Result<Vec<_>, _>>()?;

    people
        .iter()
        .zip(&positions)
        .map(|(person, &origin)| {
            nearest_to(person, origin, people, &positions)
                .map(|(neighbor, distance_meters)| NeighborPair {
                    person,
                    neighbor,
                    distance_meters,
                })
                .ok_or_else(|| ValidationError::NoEligibleNeighbor {
                    id: person.id.clone(),
                })
        })
        .collect()
}

fn validated_position(person: &Person) -> Result<Geo, ValidationError> {
    let geo = person
        .position()
        .ok_or_else(|| ValidationError::MissingPosition {
            id: person.id.clone(),
        })?;

    if geo.is_valid() {
        Ok(geo)
    } else {
        Err(ValidationError::InvalidPosition {
            id: person.id.clone(),
            lat: geo.lat,
            lng: geo.lng,
        })
    }
}

fn nearest_to<'a>(
    person: &Person,
    origin: Geo,
    people: &'a [Person],
    positions: &[Geo],
) -> Option<(&'a Person, f64)> {
    people
        .iter()
        .zip(positions)
        .filter(|(candidate, _)| candidate.id != person.id)
        .fold(None, |best, (candidate, &position)| {
            let distance = haversine_distance(origin, position);
            // replace only when strictly closer, so earlier candidates win ties
            let closer = best.map_or(true, |(_, best_distance)| distance < best_distance);
            if closer {
                Some((candidate, distance))
            } else {
                best
            }
        })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn result_is_index_aligned_and_never_self(
            coords in prop::collection::vec((-89.0..89.0f64, -179.0..179.0f64), 2..12)
        ) {
            let people: Vec<Person> = coords
                .iter()
                .enumerate()
                .map(|(i, &(lat, lng))| Person::new(i as i64).with_position(lat, lng))
                .collect();

            let pairs = find_closest_pairs(&people).unwrap();

            prop_assert_eq!(pairs.len(), people.len());
            for (i, pair) in pairs.iter().enumerate() {
                prop_assert!(std::ptr::eq(pair.person, &people[i]));
                prop_assert!(pair.neighbor.id != pair.person.id);
                let origin = people[i].position().unwrap();
                for other in people.iter().filter(|p| p.id != people[i].id) {
                    let distance = haversine_distance(origin, other.position().unwrap());
                    prop_assert!(pair.distance_meters <= distance);
                }
            }
        }
    }
}
