use owo_colors::OwoColorize;
use serde::Serialize;
use skyfare_core::DealLabel;
use skyfare_core::PriceAnalytics;
use skyfare_core::PriceTrend;
use skyfare_core::SessionSnapshot;
use skyfare_core::TrendDirection;
use skyfare_protocol::FilterState;
use skyfare_protocol::FlightOffer;
use skyfare_protocol::offer::format_duration;
use skyfare_protocol::offer::stop_label;

/// Machine-readable search output for `--json`.
#[derive(Debug, Serialize)]
pub(crate) struct SearchReport<'a> {
    pub caption: String,
    pub filters: &'a FilterState,
    pub offers: &'a [FlightOffer],
    pub visible_count: usize,
    pub total_count: usize,
    pub excluded_malformed: usize,
    pub unique_airlines: &'a [String],
    pub analytics: &'a PriceAnalytics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<&'a PriceTrend>,
}

impl<'a> SearchReport<'a> {
    pub fn new(snapshot: &'a SessionSnapshot, trend: Option<&'a PriceTrend>) -> Self {
        let view = &snapshot.view;
        Self {
            caption: view.caption(),
            filters: &snapshot.filters,
            offers: &view.visible[..snapshot.revealed.min(view.visible.len())],
            visible_count: view.visible.len(),
            total_count: view.base_count,
            excluded_malformed: view.excluded_malformed,
            unique_airlines: &view.unique_airlines,
            analytics: &view.analytics,
            trend,
        }
    }
}

pub(crate) fn money(amount: f64, currency: &str) -> String {
    if currency.is_empty() || currency == "USD" {
        format!("${amount:.2}")
    } else {
        format!("{amount:.2} {currency}")
    }
}

/// One-line description of an offer's outbound journey, without colors.
pub(crate) fn offer_summary(offer: &FlightOffer) -> String {
    let segments = offer.outbound_segments();
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return format!("{} (no itinerary)", offer.id);
    };
    let duration = offer
        .itineraries
        .first()
        .and_then(|itinerary| itinerary.duration.as_deref())
        .unwrap_or(first.duration.as_str());
    let stops = offer.stop_count().map(stop_label).unwrap_or_default();
    format!(
        "{} {} → {} {}  {}  {}  {}",
        first.departure.iata_code,
        first.departure.clock_time(),
        last.arrival.iata_code,
        last.arrival.clock_time(),
        format_duration(duration),
        stops,
        offer.carrier_route(),
    )
}

pub(crate) fn print_report(report: &SearchReport<'_>) {
    println!("{}", report.caption.bold());
    if report.visible_count == 0 {
        print_exclusions(report.excluded_malformed);
        return;
    }

    let analytics = report.analytics;
    let currency = report
        .offers
        .first()
        .map(FlightOffer::currency)
        .unwrap_or_default();
    println!(
        "Cheapest {}  Average {}  Highest {}",
        money(analytics.cheapest, currency).green(),
        money(analytics.average, currency),
        money(analytics.highest, currency).red(),
    );
    println!("Airlines: {}", report.unique_airlines.join(", ").dimmed());
    println!();

    for (index, offer) in report.offers.iter().enumerate() {
        let price = offer
            .price_amount()
            .map(|amount| money(amount, offer.currency()))
            .unwrap_or_default();
        let label = match analytics.label_for(&offer.id) {
            Some(DealLabel::GoodDeal) => DealLabel::GoodDeal.label().green().to_string(),
            Some(DealLabel::PriceRising) => DealLabel::PriceRising.label().yellow().to_string(),
            None => String::new(),
        };
        println!(
            "{:>3}. {:>10}  {}  {}",
            index + 1,
            price.bold(),
            offer_summary(offer),
            label
        );
    }

    if report.offers.len() < report.visible_count {
        println!();
        println!(
            "Showing {} of {} offers (use --pages to reveal more)",
            report.offers.len(),
            report.visible_count
        );
    }
    print_exclusions(report.excluded_malformed);

    if let Some(trend) = report.trend {
        print_trend(trend, currency);
    }
}

fn print_exclusions(excluded: usize) {
    if excluded > 0 {
        println!(
            "{}",
            format!("{excluded} offers skipped because of a missing price or itinerary.").dimmed()
        );
    }
}

fn print_trend(trend: &PriceTrend, currency: &str) {
    let arrow = match trend.direction() {
        TrendDirection::Up => "↑".red().to_string(),
        TrendDirection::Down => "↓".green().to_string(),
        TrendDirection::Flat => "→".to_string(),
    };
    println!();
    println!("{} {}", "Price trend (synthetic estimate)".bold(), arrow);
    for point in &trend.points {
        println!(
            "  {:<7} {:>10}  cheapest {:>10}  average {:>10}",
            point.label(),
            money(point.price, currency),
            money(point.cheapest, currency),
            money(point.average, currency),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skyfare_protocol::Itinerary;
    use skyfare_protocol::Price;
    use skyfare_protocol::Segment;
    use skyfare_protocol::SegmentEndpoint;

    fn leg(from: &str, to: &str, dep: &str, arr: &str, carrier: &str) -> Segment {
        Segment {
            departure: SegmentEndpoint {
                iata_code: from.to_string(),
                at: dep.to_string(),
            },
            arrival: SegmentEndpoint {
                iata_code: to.to_string(),
                at: arr.to_string(),
            },
            carrier_code: carrier.to_string(),
            number: None,
            duration: "PT1H".to_string(),
        }
    }

    #[test]
    fn summary_spans_first_departure_to_last_arrival() {
        let offer = FlightOffer {
            id: "1".to_string(),
            price: Some(Price {
                total: "199.00".to_string(),
                currency: "USD".to_string(),
            }),
            itineraries: vec![Itinerary {
                duration: Some("PT7H45M".to_string()),
                segments: vec![
                    leg("JFK", "ORD", "2026-11-01T06:15:00", "2026-11-01T08:05:00", "AA"),
                    leg("ORD", "LAX", "2026-11-01T09:30:00", "2026-11-01T11:00:00", "BA"),
                ],
            }],
        };
        assert_eq!(
            offer_summary(&offer),
            "JFK 06:15 → LAX 11:00  7h 45m  1 stop  AA → BA"
        );
    }

    #[test]
    fn money_uses_dollar_sign_for_usd_only() {
        assert_eq!(money(312.4, "USD"), "$312.40");
        assert_eq!(money(99.0, "EUR"), "99.00 EUR");
    }
}
