use std::collections::BTreeSet;

use skyfare_protocol::FilterState;
use skyfare_protocol::FlightOffer;
use skyfare_protocol::PriceSort;
use tracing::debug;

/// Result of running the filter/sort engine over a base offer list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterOutcome {
    /// Offers that pass every predicate, in display order.
    pub visible: Vec<FlightOffer>,

    /// Every carrier in the base list, sorted, without duplicates.
    pub unique_airlines: Vec<String>,

    /// Offers dropped because their price or outbound itinerary was unusable.
    pub excluded_malformed: usize,
}

/// Pure filter + sort over `offers`. Never mutates its inputs.
pub fn apply(offers: &[FlightOffer], filters: &FilterState) -> FilterOutcome {
    let unique_airlines = unique_airlines(offers);

    let mut excluded_malformed = 0;
    let mut retained: Vec<(f64, &FlightOffer)> = Vec::with_capacity(offers.len());
    for offer in offers {
        let Some((price, stops)) = offer.price_and_stops() else {
            excluded_malformed += 1;
            continue;
        };
        if matches_filters(offer, price, stops, filters) {
            retained.push((price, offer));
        }
    }

    // `sort_by` is stable, so equal prices keep their upstream order.
    match filters.sort_by_price {
        PriceSort::None => {}
        PriceSort::Lowest => retained.sort_by(|(a, _), (b, _)| a.total_cmp(b)),
        PriceSort::Highest => retained.sort_by(|(a, _), (b, _)| b.total_cmp(a)),
    }

    if excluded_malformed > 0 {
        debug!(excluded_malformed, total = offers.len(), "skipped malformed offers");
    }

    FilterOutcome {
        visible: retained
            .into_iter()
            .map(|(_, offer)| offer.clone())
            .collect(),
        unique_airlines,
        excluded_malformed,
    }
}

/// Facet values for the airline filter, taken from the unfiltered list so an excluded
/// airline can always be re-included.
pub fn unique_airlines(offers: &[FlightOffer]) -> Vec<String> {
    offers
        .iter()
        .flat_map(FlightOffer::carriers)
        .filter(|code| !code.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn matches_filters(offer: &FlightOffer, price: f64, stops: usize, filters: &FilterState) -> bool {
    if !filters.price_in_range(price) {
        return false;
    }
    if !filters.airlines.is_empty()
        && !offer
            .carriers()
            .any(|carrier| filters.airlines.contains(carrier))
    {
        return false;
    }
    filters.stops.is_empty() || filters.stops.contains(&stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skyfare_protocol::Itinerary;
    use skyfare_protocol::Price;
    use skyfare_protocol::Segment;
    use skyfare_protocol::SegmentEndpoint;

    fn segment(carrier: &str) -> Segment {
        Segment {
            departure: SegmentEndpoint {
                iata_code: "JFK".to_string(),
                at: "2026-11-01T08:00:00".to_string(),
            },
            arrival: SegmentEndpoint {
                iata_code: "LAX".to_string(),
                at: "2026-11-01T11:00:00".to_string(),
            },
            carrier_code: carrier.to_string(),
            number: None,
            duration: "PT6H".to_string(),
        }
    }

    fn offer(id: &str, total: &str, carriers: &[&str]) -> FlightOffer {
        FlightOffer {
            id: id.to_string(),
            price: Some(Price {
                total: total.to_string(),
                currency: "USD".to_string(),
            }),
            itineraries: vec![Itinerary {
                duration: None,
                segments: carriers.iter().map(|carrier| segment(carrier)).collect(),
            }],
        }
    }

    fn sample() -> Vec<FlightOffer> {
        vec![
            offer("a", "450.00", &["UA"]),
            offer("b", "120.50", &["AA", "DL"]),
            offer("c", "300.00", &["DL", "DL", "AA"]),
            offer("d", "120.50", &["B6"]),
            offer("e", "6200.00", &["UA"]),
        ]
    }

    fn ids(offers: &[FlightOffer]) -> Vec<&str> {
        offers.iter().map(|offer| offer.id.as_str()).collect()
    }

    fn no_sort() -> FilterState {
        FilterState {
            sort_by_price: PriceSort::None,
            ..Default::default()
        }
    }

    #[test]
    fn default_filters_sort_lowest_and_drop_out_of_range() {
        let outcome = apply(&sample(), &FilterState::default());
        assert_eq!(ids(&outcome.visible), vec!["b", "d", "c", "a"]);
        assert_eq!(outcome.excluded_malformed, 0);
    }

    #[test]
    fn highest_sort_is_descending_and_stable() {
        let filters = FilterState {
            sort_by_price: PriceSort::Highest,
            ..Default::default()
        };
        let outcome = apply(&sample(), &filters);
        assert_eq!(ids(&outcome.visible), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn unsorted_preserves_upstream_order() {
        let outcome = apply(&sample(), &no_sort());
        assert_eq!(ids(&outcome.visible), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = apply(&sample(), &FilterState::default());
        let twice = apply(&once.visible, &FilterState::default());
        assert_eq!(ids(&once.visible), ids(&twice.visible));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filters = FilterState {
            min_price: 120.5,
            max_price: 300.0,
            ..no_sort()
        };
        let outcome = apply(&sample(), &filters);
        assert_eq!(ids(&outcome.visible), vec!["b", "c", "d"]);
    }

    #[test]
    fn airline_filter_matches_any_segment() {
        let mut filters = no_sort();
        filters.airlines.insert("AA".to_string());
        let outcome = apply(&sample(), &filters);
        assert_eq!(ids(&outcome.visible), vec!["b", "c"]);
    }

    #[test]
    fn stop_filter_uses_outbound_segment_count() {
        let mut filters = no_sort();
        filters.stops.insert(0);
        filters.stops.insert(2);
        let outcome = apply(&sample(), &filters);
        assert_eq!(ids(&outcome.visible), vec!["a", "c", "d"]);
    }

    #[test]
    fn facets_ignore_current_filters() {
        let mut filters = no_sort();
        filters.airlines.insert("B6".to_string());
        filters.max_price = 200.0;
        let outcome = apply(&sample(), &filters);
        assert_eq!(ids(&outcome.visible), vec!["d"]);
        assert_eq!(outcome.unique_airlines, vec!["AA", "B6", "DL", "UA"]);
    }

    #[test]
    fn malformed_offers_are_excluded_and_counted() {
        let mut offers = sample();
        offers.push(offer("bad-price", "call us", &["AA"]));
        offers.push(offer("no-segments", "99.00", &[]));
        let mut no_price = offer("no-price", "1.00", &["ZZ"]);
        no_price.price = None;
        offers.push(no_price);

        let outcome = apply(&offers, &no_sort());
        assert_eq!(ids(&outcome.visible), vec!["a", "b", "c", "d"]);
        assert_eq!(outcome.excluded_malformed, 3);
        // Carriers of the base list still show up as facets.
        assert!(outcome.unique_airlines.contains(&"ZZ".to_string()));
    }

    #[test]
    fn empty_input_yields_empty_outcome() {
        assert_eq!(apply(&[], &FilterState::default()), FilterOutcome::default());
    }

    #[test]
    fn visible_is_a_subset_satisfying_every_predicate() {
        let offers = sample();
        let mut states = vec![FilterState::default(), no_sort()];
        let mut narrow = FilterState {
            min_price: 100.0,
            max_price: 400.0,
            ..Default::default()
        };
        narrow.airlines.insert("DL".to_string());
        narrow.stops.insert(1);
        states.push(narrow);

        for filters in states {
            let outcome = apply(&offers, &filters);
            for shown in &outcome.visible {
                assert!(offers.contains(shown));
                let price = shown.price_amount().expect("visible offers have prices");
                assert!(filters.price_in_range(price));
                assert!(
                    filters.airlines.is_empty()
                        || shown.carriers().any(|c| filters.airlines.contains(c))
                );
                let stops = shown.stop_count().expect("visible offers have segments");
                assert!(filters.stops.is_empty() || filters.stops.contains(&stops));
            }
        }
    }
}
