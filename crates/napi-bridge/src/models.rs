use napi_derive::napi;
use tsp_trace_core::City;

#[napi(object, js_name = "City")]
#[derive(Clone, Debug)]
pub struct JsCity {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl From<JsCity> for City {
    fn from(city: JsCity) -> Self {
        City::new(city.id, city.name, city.x, city.y)
    }
}

impl From<City> for JsCity {
    fn from(city: City) -> Self {
        JsCity { id: city.id, name: city.name, x: city.x, y: city.y }
    }
}

/// Converts and validates the caller's cities; duplicate names would collide
/// in the DP subset keys.
pub fn into_cities(cities: Vec<JsCity>) -> napi::Result<Vec<City>> {
    let cities: Vec<City> = cities.into_iter().map(City::from).collect();
    City::validate_list(&cities).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    Ok(cities)
}
