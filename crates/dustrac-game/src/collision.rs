//! Collision events between scene entities.
//!
//! Overlap detection is a plain bounds test; the interesting part is the
//! dispatch, which hands each entity the *other* party as a closed enum.

use dustrac_engine::coords::Rect;

use crate::car::Car;
use crate::pit::Pit;

/// Entities that can be on the other side of a collision.
#[derive(Debug, Copy, Clone)]
pub enum Collidable<'a> {
    Car(&'a Car),
    /// The scene boundary.
    Wall,
}

/// A collision as seen by one participant.
#[derive(Debug, Copy, Clone)]
pub struct CollisionEvent<'a> {
    pub other: Collidable<'a>,
}

impl<'a> CollisionEvent<'a> {
    pub fn new(other: Collidable<'a>) -> Self {
        Self { other }
    }
}

/// Delivers this step's collision events.
///
/// Order: pit contacts, then car/car contacts, then wall contacts.
pub fn dispatch(scene: Rect, cars: &mut [Car], pit: &mut Pit) {
    for car in cars.iter() {
        if car.bounds().overlaps(pit.bounds()) {
            pit.collision_event(&CollisionEvent::new(Collidable::Car(car)));
        }
    }

    for (a, b) in overlapping_pairs(cars) {
        let (first, second) = (cars[a].clone(), cars[b].clone());
        cars[a].collision_event(&CollisionEvent::new(Collidable::Car(&second)));
        cars[b].collision_event(&CollisionEvent::new(Collidable::Car(&first)));
    }

    for car in cars.iter_mut() {
        if outside(scene, car.bounds()) {
            car.collision_event(&CollisionEvent::new(Collidable::Wall));
            car.keep_inside(scene);
        }
    }
}

fn overlapping_pairs(cars: &[Car]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for a in 0..cars.len() {
        for b in a + 1..cars.len() {
            if cars[a].bounds().overlaps(cars[b].bounds()) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

fn outside(scene: Rect, bounds: Rect) -> bool {
    let (min, max) = (bounds.origin, bounds.max());
    let scene_max = scene.max();
    min.x < scene.origin.x || min.y < scene.origin.y || max.x > scene_max.x || max.y > scene_max.y
}

#[cfg(test)]
mod tests {
    use dustrac_engine::coords::Vec2;

    use super::*;
    use crate::car::{CarId, Controls, Driver};

    const SCENE: Rect = Rect::new(0.0, 0.0, 1024.0, 768.0);

    fn pit() -> Pit {
        Pit::new(Rect::new(400.0, 600.0, 200.0, 60.0))
    }

    fn car(id: u32, driver: Driver, x: f32, y: f32) -> Car {
        Car::new(CarId(id), driver, Vec2::new(x, y), 0.0)
    }

    #[test]
    fn car_over_the_pit_reaches_the_pit() {
        let mut pit = pit();
        let mut cars = vec![car(0, Driver::Human, 500.0, 630.0)];
        dispatch(SCENE, &mut cars, &mut pit);
        assert!(pit.is_pitting(CarId(0)));
    }

    #[test]
    fn car_away_from_the_pit_does_not() {
        let mut pit = pit();
        let mut cars = vec![car(0, Driver::Human, 100.0, 100.0)];
        dispatch(SCENE, &mut cars, &mut pit);
        assert_eq!(pit.pitting_count(), 0);
    }

    #[test]
    fn overlapping_cars_both_take_damage() {
        let mut pit = pit();
        let mut cars = vec![
            car(0, Driver::Human, 100.0, 100.0),
            car(1, Driver::Computer, 110.0, 100.0),
            car(2, Driver::Computer, 300.0, 100.0),
        ];
        dispatch(SCENE, &mut cars, &mut pit);
        assert!(cars[0].damage() > 0.0);
        assert!(cars[1].damage() > 0.0);
        assert_eq!(cars[2].damage(), 0.0);
    }

    #[test]
    fn leaving_the_scene_hits_the_wall() {
        let mut pit = pit();
        let mut cars = vec![car(0, Driver::Human, 2.0, 100.0)];
        cars[0].set_speed_kmh(40.0);
        dispatch(SCENE, &mut cars, &mut pit);
        assert_eq!(cars[0].speed_kmh(), 20.0);
        assert!(!outside(SCENE, cars[0].bounds()));
    }

    #[test]
    fn car_driving_into_the_wall_bounces_back_inside() {
        let mut pit = pit();
        let mut cars = vec![car(0, Driver::Human, 1000.0, 100.0)];
        cars[0].set_speed_kmh(100.0);
        let controls = Controls {
            accelerate: true,
            ..Controls::default()
        };

        let mut wall_hits = 0;
        for _ in 0..600 {
            cars[0].step(1.0 / 60.0, controls);
            if outside(SCENE, cars[0].bounds()) {
                wall_hits += 1;
            }
            dispatch(SCENE, &mut cars, &mut pit);
            assert!(!outside(SCENE, cars[0].bounds()));
        }

        // Ten seconds at up to 300 units/s is a handful of crossings.
        assert!(wall_hits <= 5, "{wall_hits} wall hits");
        assert!(cars[0].damage() < 0.5);
        assert!(cars[0].speed_kmh() > 50.0);
    }
}
