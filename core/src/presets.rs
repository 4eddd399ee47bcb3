use skyfare_protocol::SelectedLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularRoute {
    pub origin: &'static str,
    pub destination: &'static str,
    pub label: &'static str,
}

pub const POPULAR_ROUTES: &[PopularRoute] = &[
    PopularRoute {
        origin: "NYC",
        destination: "LAX",
        label: "New York → Los Angeles",
    },
    PopularRoute {
        origin: "LON",
        destination: "PAR",
        label: "London → Paris",
    },
    PopularRoute {
        origin: "DXB",
        destination: "TYO",
        label: "Dubai → Tokyo",
    },
    PopularRoute {
        origin: "LAX",
        destination: "MIA",
        label: "Los Angeles → Miami",
    },
];

impl PopularRoute {
    /// Origin and destination as form selections.
    pub fn endpoints(&self) -> (SelectedLocation, SelectedLocation) {
        (
            SelectedLocation::from_code(self.origin),
            SelectedLocation::from_code(self.destination),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn routes_resolve_to_city_codes() {
        let (origin, destination) = POPULAR_ROUTES[2].endpoints();
        assert_eq!(origin.city_code, "DXB");
        assert_eq!(destination.city_code, "TYO");
        assert!(POPULAR_ROUTES.iter().all(|route| route.origin != route.destination));
    }
}
