use skyfare_protocol::FlightSearchRequest;
use skyfare_protocol::SearchCriteria;

use crate::error::RequiredField;
use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks the criteria and turns them into the provider's query contract.
///
/// Required fields are checked in form order (origin, destination, departure date) so the
/// first missing one is reported.
pub fn build_request(criteria: &SearchCriteria) -> Result<FlightSearchRequest, ValidationError> {
    let origin = criteria
        .origin
        .as_ref()
        .ok_or(ValidationError::MissingRequiredField {
            field: RequiredField::Origin,
        })?;
    let destination = criteria
        .destination
        .as_ref()
        .ok_or(ValidationError::MissingRequiredField {
            field: RequiredField::Destination,
        })?;
    let departure = criteria
        .departure_date
        .ok_or(ValidationError::MissingRequiredField {
            field: RequiredField::DepartureDate,
        })?;

    if criteria.passengers.adults == 0 {
        return Err(ValidationError::NoAdults);
    }

    let return_date = criteria.effective_return_date();
    if let Some(return_date) = return_date
        && return_date < departure
    {
        return Err(ValidationError::ReturnBeforeDeparture {
            departure,
            return_date,
        });
    }

    let passengers = criteria.passengers;
    Ok(FlightSearchRequest {
        origin_location_code: origin.city_code.clone(),
        destination_location_code: destination.city_code.clone(),
        departure_date: departure.format(DATE_FORMAT).to_string(),
        return_date: return_date.map(|date| date.format(DATE_FORMAT).to_string()),
        adults: passengers.adults,
        children: (passengers.children > 0).then_some(passengers.children),
        infants: (passengers.infants > 0).then_some(passengers.infants),
        travel_class: criteria.travel_class,
        non_stop: criteria.non_stop,
        currency_code: criteria.currency.clone(),
        max: criteria.max_results,
    })
}
