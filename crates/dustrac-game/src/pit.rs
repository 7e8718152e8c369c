//! Pit stop zone.
//!
//! The pit learns which cars are stopping through collision events and forgets
//! them through a per-step aging pass. Each car's entry carries the pit's step
//! tag from its most recent qualifying contact:
//!
//! - not pitting: no entry
//! - pitting: entry refreshed by every qualifying contact
//! - stale: `stored + 1 < tag`, removed by [`Pit::step_time`]
//!
//! A car therefore stays in the set for one extra step after its last contact.
//! The collision pass runs before the aging pass within a step, so a car that
//! keeps touching the pit never ages out.

use std::collections::HashMap;

use dustrac_engine::coords::Rect;

use crate::car::CarId;
use crate::collision::{Collidable, CollisionEvent};

/// Cars must be strictly slower than this to count as stopping.
pub const PIT_SPEED_LIMIT_KMH: f32 = 25.0;

/// Emitted once when a car enters the pitting set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PitStop {
    pub car: CarId,
}

#[derive(Debug)]
pub struct Pit {
    bounds: Rect,
    tag: u64,
    pitting: HashMap<CarId, u64>,
    stops: Vec<PitStop>,
}

impl Pit {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            tag: 0,
            pitting: HashMap::new(),
            stops: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Current step tag.
    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn is_pitting(&self, car: CarId) -> bool {
        self.pitting.contains_key(&car)
    }

    pub fn pitting_count(&self) -> usize {
        self.pitting.len()
    }

    /// Handles a collision with another entity.
    ///
    /// Only slow, human-driven cars count; anything else leaves the pit
    /// untouched.
    pub fn collision_event(&mut self, event: &CollisionEvent<'_>) {
        let Collidable::Car(car) = event.other else {
            return;
        };

        if !car.is_human() || car.speed_kmh() >= PIT_SPEED_LIMIT_KMH {
            return;
        }

        if self.pitting.insert(car.id(), self.tag).is_none() {
            log::debug!("car {} entered the pit at tag {}", car.id(), self.tag);
            self.stops.push(PitStop { car: car.id() });
        }
    }

    /// Ages out cars not seen recently, then advances the tag.
    pub fn step_time(&mut self) {
        let tag = self.tag;
        self.pitting.retain(|car, seen| {
            let keep = *seen + 1 >= tag;
            if !keep {
                log::debug!("car {car} left the pit at tag {tag}");
            }
            keep
        });

        self.tag += 1;
    }

    /// Takes the pit stop notifications queued since the last call, in
    /// emission order.
    pub fn drain_pit_stops(&mut self) -> std::vec::Drain<'_, PitStop> {
        self.stops.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use dustrac_engine::coords::Vec2;

    use super::*;
    use crate::car::{Car, Driver};

    fn pit() -> Pit {
        Pit::new(Rect::new(0.0, 0.0, 100.0, 50.0))
    }

    fn car(id: u32, driver: Driver, speed: f32) -> Car {
        let mut car = Car::new(CarId(id), driver, Vec2::new(50.0, 25.0), 0.0);
        car.set_speed_kmh(speed);
        car
    }

    fn hit(pit: &mut Pit, car: &Car) {
        pit.collision_event(&CollisionEvent::new(Collidable::Car(car)));
    }

    fn stops(pit: &mut Pit) -> Vec<PitStop> {
        pit.drain_pit_stops().collect()
    }

    #[test]
    fn slow_human_car_enters_and_ages_out() {
        let mut pit = pit();
        let a = car(1, Driver::Human, 10.0);

        // Step 0: contact.
        hit(&mut pit, &a);
        assert_eq!(stops(&mut pit), vec![PitStop { car: CarId(1) }]);
        assert!(pit.is_pitting(CarId(1)));
        pit.step_time();
        assert!(pit.is_pitting(CarId(1)));

        // Step 1: no contact, still within grace.
        pit.step_time();
        assert!(pit.is_pitting(CarId(1)));

        // Step 2: no contact, removed.
        pit.step_time();
        assert!(!pit.is_pitting(CarId(1)));
        assert_eq!(pit.tag(), 3);
    }

    #[test]
    fn computer_car_is_ignored() {
        let mut pit = pit();
        hit(&mut pit, &car(2, Driver::Computer, 10.0));
        assert_eq!(pit.pitting_count(), 0);
        assert!(stops(&mut pit).is_empty());
    }

    #[test]
    fn speed_limit_is_strict() {
        let mut pit = pit();
        hit(&mut pit, &car(1, Driver::Human, 30.0));
        hit(&mut pit, &car(2, Driver::Human, PIT_SPEED_LIMIT_KMH));
        assert_eq!(pit.pitting_count(), 0);

        hit(&mut pit, &car(3, Driver::Human, 24.9));
        assert!(pit.is_pitting(CarId(3)));
    }

    #[test]
    fn fast_contact_does_not_refresh_an_entry() {
        let mut pit = pit();
        let mut a = car(1, Driver::Human, 10.0);
        hit(&mut pit, &a);
        pit.step_time();
        pit.step_time();

        a.set_speed_kmh(40.0);
        hit(&mut pit, &a);
        pit.step_time();
        assert!(!pit.is_pitting(CarId(1)));
    }

    #[test]
    fn repeated_contact_in_one_step_is_idempotent() {
        let mut pit = pit();
        let a = car(1, Driver::Human, 5.0);
        for _ in 0..4 {
            hit(&mut pit, &a);
        }
        assert_eq!(pit.pitting_count(), 1);
        assert_eq!(stops(&mut pit).len(), 1);
    }

    #[test]
    fn notification_fires_once_per_contiguous_run() {
        let mut pit = pit();
        let a = car(1, Driver::Human, 5.0);

        for _ in 0..10 {
            hit(&mut pit, &a);
            pit.step_time();
        }
        assert_eq!(stops(&mut pit).len(), 1);

        // Gap long enough to age out, then a new visit.
        pit.step_time();
        pit.step_time();
        assert!(!pit.is_pitting(CarId(1)));

        hit(&mut pit, &a);
        assert_eq!(stops(&mut pit), vec![PitStop { car: CarId(1) }]);
    }

    #[test]
    fn contact_on_the_grace_step_keeps_the_car_without_notifying() {
        let mut pit = pit();
        let a = car(1, Driver::Human, 5.0);
        hit(&mut pit, &a);
        pit.step_time();
        pit.step_time();

        // Last step before removal.
        hit(&mut pit, &a);
        pit.step_time();
        assert!(pit.is_pitting(CarId(1)));
        assert_eq!(stops(&mut pit).len(), 1);
    }

    #[test]
    fn wall_contact_is_ignored() {
        let mut pit = pit();
        pit.collision_event(&CollisionEvent::new(Collidable::Wall));
        assert_eq!(pit.pitting_count(), 0);
    }

    #[test]
    fn cars_are_tracked_independently() {
        let mut pit = pit();
        let a = car(1, Driver::Human, 5.0);
        let b = car(2, Driver::Human, 5.0);

        hit(&mut pit, &a);
        pit.step_time();
        hit(&mut pit, &b);
        pit.step_time();
        pit.step_time();

        assert!(!pit.is_pitting(CarId(1)));
        assert!(pit.is_pitting(CarId(2)));
        assert_eq!(
            stops(&mut pit),
            vec![PitStop { car: CarId(1) }, PitStop { car: CarId(2) }]
        );
    }
}
