use std::collections::HashMap;

use crate::car::{Car, CarId};
use crate::pit::PitStop;

/// Race bookkeeping that reacts to pit stops.
#[derive(Debug, Default)]
pub struct Race {
    pit_stops: HashMap<CarId, u32>,
}

impl Race {
    pub fn new() -> Self {
        Self::default()
    }

    /// Services the stopping car: fresh tires, repaired body.
    pub fn on_pit_stop(&mut self, stop: PitStop, cars: &mut [Car]) {
        let Some(car) = cars.iter_mut().find(|c| c.id() == stop.car) else {
            log::warn!("pit stop for unknown car {}", stop.car);
            return;
        };

        let count = self.pit_stops.entry(stop.car).or_insert(0);
        *count += 1;

        log::info!(
            "pit stop {count} for car {}: tire wear {:.0}%, damage {:.0}%",
            stop.car,
            car.tire_wear() * 100.0,
            car.damage() * 100.0
        );
        car.repair();
    }

    pub fn pit_stops(&self, car: CarId) -> u32 {
        self.pit_stops.get(&car).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use dustrac_engine::coords::Vec2;

    use super::*;
    use crate::car::{Controls, Driver};

    #[test]
    fn pit_stop_repairs_and_counts() {
        let mut cars = vec![Car::new(CarId(7), Driver::Human, Vec2::zero(), 0.0)];
        cars[0].set_speed_kmh(100.0);
        cars[0].step(1.0, Controls::default());
        assert!(cars[0].tire_wear() > 0.0);

        let mut race = Race::new();
        race.on_pit_stop(PitStop { car: CarId(7) }, &mut cars);
        race.on_pit_stop(PitStop { car: CarId(7) }, &mut cars);

        assert_eq!(cars[0].tire_wear(), 0.0);
        assert_eq!(race.pit_stops(CarId(7)), 2);
    }

    #[test]
    fn unknown_car_is_ignored() {
        let mut race = Race::new();
        race.on_pit_stop(PitStop { car: CarId(1) }, &mut []);
        assert_eq!(race.pit_stops(CarId(1)), 0);
    }
}
