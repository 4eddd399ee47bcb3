use chrono::NaiveDateTime;
use chrono::TimeDelta;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Price {
    /// Decimal string exactly as the provider sent it. A bare JSON number is kept as its
    /// decimal text; `null` becomes empty and yields no amount.
    #[serde(default, deserialize_with = "decimal_text")]
    pub total: String,
    #[serde(default)]
    pub currency: String,
}

impl Price {
    /// Numeric value of `total`, if it is a finite decimal.
    pub fn amount(&self) -> Option<f64> {
        self.total
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    pub iata_code: String,
    /// Local timestamp, e.g. `2026-11-01T10:35:00`.
    #[serde(default)]
    pub at: String,
}

impl SegmentEndpoint {
    pub fn time(&self) -> Option<NaiveDateTime> {
        self.at.parse().ok()
    }

    /// `HH:MM` rendering of the timestamp, or the raw value when unparseable.
    pub fn clock_time(&self) -> String {
        match self.time() {
            Some(time) => time.format("%H:%M").to_string(),
            None => self.at.clone(),
        }
    }
}

/// A single flown leg operated by one carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    pub carrier_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// ISO-8601 duration such as `PT2H30M`.
    #[serde(default)]
    pub duration: String,
}

impl Segment {
    pub fn flight_time(&self) -> Option<TimeDelta> {
        parse_iso_duration(&self.duration)
    }
}

/// One directional journey (outbound or return).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// A priced, bookable itinerary set. Immutable once received from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub itineraries: Vec<Itinerary>,
}

impl FlightOffer {
    /// Numeric total price, `None` when missing or not a number.
    pub fn price_amount(&self) -> Option<f64> {
        self.price.as_ref().and_then(Price::amount)
    }

    pub fn currency(&self) -> &str {
        self.price
            .as_ref()
            .map(|price| price.currency.as_str())
            .unwrap_or_default()
    }

    /// Segments of the outbound itinerary. Empty when the offer has no itinerary.
    pub fn outbound_segments(&self) -> &[Segment] {
        self.itineraries
            .first()
            .map(|itinerary| itinerary.segments.as_slice())
            .unwrap_or_default()
    }

    /// Stops on the outbound itinerary; `None` when it has no segments.
    pub fn stop_count(&self) -> Option<usize> {
        self.outbound_segments().len().checked_sub(1)
    }

    /// Carrier codes of the outbound segments, in flight order.
    pub fn carriers(&self) -> impl Iterator<Item = &str> {
        self.outbound_segments()
            .iter()
            .map(|segment| segment.carrier_code.as_str())
    }

    /// `AA → BA` style route of operating carriers.
    pub fn carrier_route(&self) -> String {
        self.carriers().collect::<Vec<_>>().join(" → ")
    }

    /// Numeric price and outbound stop count. `None` marks an offer the pipeline cannot
    /// reason about.
    pub fn price_and_stops(&self) -> Option<(f64, usize)> {
        Some((self.price_amount()?, self.stop_count()?))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Text(String),
    Number(f64),
}

fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Decimal>::deserialize(deserializer)? {
        Some(Decimal::Text(text)) => text,
        Some(Decimal::Number(value)) => value.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn stop_label(stops: usize) -> String {
    match stops {
        0 => "Direct".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

const DATE_UNITS: &[(char, i64)] = &[('W', 7 * 86_400), ('D', 86_400)];
const TIME_UNITS: &[(char, i64)] = &[('H', 3_600), ('M', 60), ('S', 1)];

/// Parses the subset of ISO-8601 durations providers emit (`PT2H30M`, `P1DT3H`).
pub fn parse_iso_duration(raw: &str) -> Option<TimeDelta> {
    let rest = raw.trim().strip_prefix('P')?;
    let (date_part, time_part) = rest.split_once('T').unwrap_or((rest, ""));
    let mut seconds: i64 = 0;
    let mut saw_component = false;
    for (part, units) in [(date_part, DATE_UNITS), (time_part, TIME_UNITS)] {
        let mut digits = String::new();
        for ch in part.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }
            let value: i64 = digits.parse().ok()?;
            digits.clear();
            let (_, factor) = units.iter().find(|(unit, _)| *unit == ch)?;
            seconds = seconds.checked_add(value.checked_mul(*factor)?)?;
            saw_component = true;
        }
        if !digits.is_empty() {
            return None;
        }
    }
    saw_component.then(|| TimeDelta::seconds(seconds))
}

/// `2h 30m` rendering; unparseable input renders as `0h 0m`.
pub fn format_duration(raw: &str) -> String {
    let minutes = parse_iso_duration(raw)
        .map(|delta| delta.num_minutes())
        .unwrap_or_default();
    format!("{}h {}m", minutes / 60, minutes % 60)
}
