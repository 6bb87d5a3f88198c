//! In-memory filters mirroring the fleet search endpoints.

use super::domain::{Company, Driver, Vehicle};

#[derive(Debug, Clone, Default)]
pub struct CompanyQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleQuery {
    pub q: Option<String>,
    pub company_id: Option<i64>,
    pub car_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DriverQuery {
    pub q: Option<String>,
    pub company_id: Option<i64>,
}

pub fn search_companies<'a>(companies: &'a [Company], query: &CompanyQuery) -> Vec<&'a Company> {
    let needle = normalized(query.q.as_deref());
    companies
        .iter()
        .filter(|company| match &needle {
            Some(needle) => {
                contains(company.name.as_deref(), needle)
                    || contains(Some(company.identity_card.as_str()), needle)
            }
            None => true,
        })
        .collect()
}

pub fn search_vehicles<'a>(vehicles: &'a [Vehicle], query: &VehicleQuery) -> Vec<&'a Vehicle> {
    let needle = normalized(query.q.as_deref());
    let car_type = query.car_type.as_deref().map(str::trim).filter(|t| !t.is_empty());
    vehicles
        .iter()
        .filter(|vehicle| {
            needle
                .as_ref()
                .map_or(true, |needle| contains(Some(vehicle.license_plate.as_str()), needle))
        })
        .filter(|vehicle| {
            query
                .company_id
                .map_or(true, |id| vehicle.company_id == Some(id))
        })
        .filter(|vehicle| {
            car_type.map_or(true, |car_type| vehicle.car_type.as_deref() == Some(car_type))
        })
        .collect()
}

pub fn search_drivers<'a>(drivers: &'a [Driver], query: &DriverQuery) -> Vec<&'a Driver> {
    let needle = normalized(query.q.as_deref());
    drivers
        .iter()
        .filter(|driver| match &needle {
            Some(needle) => {
                contains(driver.first_name.as_deref(), needle)
                    || contains(driver.last_name.as_deref(), needle)
                    || contains(driver.full_name.as_deref(), needle)
                    || contains(Some(driver.identity_card.as_str()), needle)
            }
            None => true,
        })
        .filter(|driver| {
            query
                .company_id
                .map_or(true, |id| driver.company_id == Some(id))
        })
        .collect()
}

fn normalized(q: Option<&str>) -> Option<String> {
    q.map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicles() -> Vec<Vehicle> {
        let mut truck = Vehicle::new(1, "12-345-67");
        truck.company_id = Some(10);
        truck.car_type = Some("truck".to_string());
        let mut van = Vehicle::new(2, "88-345-01");
        van.company_id = Some(11);
        van.car_type = Some("van".to_string());
        let mut trailer = Vehicle::new(3, "40-900-77");
        trailer.company_id = Some(10);
        trailer.car_type = Some("trailer".to_string());
        vec![truck, van, trailer]
    }

    #[test]
    fn vehicle_filters_combine() {
        let fleet = vehicles();
        let by_plate = search_vehicles(
            &fleet,
            &VehicleQuery {
                q: Some(" 345 ".to_string()),
                ..VehicleQuery::default()
            },
        );
        assert_eq!(by_plate.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2]);

        let by_company = search_vehicles(
            &fleet,
            &VehicleQuery {
                q: Some("345".to_string()),
                company_id: Some(10),
                car_type: None,
            },
        );
        assert_eq!(by_company.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);

        let by_type = search_vehicles(
            &fleet,
            &VehicleQuery {
                car_type: Some("trailer".to_string()),
                ..VehicleQuery::default()
            },
        );
        assert_eq!(by_type.iter().map(|v| v.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn blank_car_type_does_not_filter() {
        let mut fleet = vehicles();
        fleet.push(Vehicle::new(4, "55-001-10"));

        for blank in ["", "  "] {
            let hits = search_vehicles(
                &fleet,
                &VehicleQuery {
                    car_type: Some(blank.to_string()),
                    ..VehicleQuery::default()
                },
            );
            assert_eq!(hits.len(), 4, "car_type {blank:?}");
        }
    }

    #[test]
    fn driver_search_matches_names_case_insensitively() {
        let mut dana = Driver::new(1, "039281734");
        dana.first_name = Some("Dana".to_string());
        dana.last_name = Some("Levi".to_string());
        dana.company_id = Some(10);
        let mut amir = Driver::new(2, "200111222");
        amir.full_name = Some("Amir Cohen".to_string());

        let drivers = vec![dana, amir];
        let hits = search_drivers(
            &drivers,
            &DriverQuery {
                q: Some("LEVI".to_string()),
                company_id: None,
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let by_card = search_drivers(
            &drivers,
            &DriverQuery {
                q: Some("2001".to_string()),
                company_id: None,
            },
        );
        assert_eq!(by_card[0].id, 2);

        let empty = search_drivers(&drivers, &DriverQuery::default());
        assert_eq!(empty.len(), 2);
    }

    #[test]
    fn company_search_falls_back_to_identity_card() {
        let mut ziv = Company::new(1, "514000001");
        ziv.name = Some("Ziv Haulage".to_string());
        let unnamed = Company::new(2, "514000777");
        let companies = vec![ziv, unnamed];

        let hits = search_companies(
            &companies,
            &CompanyQuery {
                q: Some("777".to_string()),
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        let hits = search_companies(
            &companies,
            &CompanyQuery {
                q: Some("haul".to_string()),
            },
        );
        assert_eq!(hits[0].id, 1);
    }
}
