//! Car registry: the `cars` mapping and the cascade into maintenance and history.

use tracing::{debug, info};

use crate::models::{Car, Dataset};

impl Dataset {
    pub fn has_car(&self, name: &str) -> bool {
        self.cars.contains_key(name)
    }

    pub fn car(&self, name: &str) -> Option<&Car> {
        self.cars.get(name)
    }

    /// Registers a car. Does nothing if a car with this name already exists.
    ///
    /// `image_path` is the recorded path of an already stored image, or empty.
    /// Returns whether the car was added.
    pub fn add_car(&mut self, name: &str, model_year: &str, image_path: Option<String>) -> bool {
        if self.has_car(name) {
            debug!(car = name, "car already registered, add ignored");
            return false;
        }
        self.cars.insert(
            name.to_string(),
            Car {
                model_year: model_year.to_string(),
                image_path: image_path.unwrap_or_default(),
            },
        );
        info!(car = name, model_year, "car added");
        true
    }

    /// Updates a car's model year, and its image path when a new image was stored.
    ///
    /// Returns whether the car exists.
    pub fn edit_car(&mut self, name: &str, model_year: &str, image_path: Option<String>) -> bool {
        let Some(car) = self.cars.get_mut(name) else {
            debug!(car = name, "unknown car, edit ignored");
            return false;
        };
        car.model_year = model_year.to_string();
        if let Some(path) = image_path {
            car.image_path = path;
        }
        info!(car = name, model_year, "car updated");
        true
    }

    /// Removes a car together with its pending maintenance and its history.
    ///
    /// Returns whether the car existed.
    pub fn remove_car(&mut self, name: &str) -> bool {
        if self.cars.remove(name).is_none() {
            debug!(car = name, "unknown car, remove ignored");
            return false;
        }
        let pending = self.maintenance.remove(name).map_or(0, |t| t.len());
        let completed = self.history.remove(name).map_or(0, |t| t.len());
        info!(car = name, pending, completed, "car removed");
        true
    }
}
