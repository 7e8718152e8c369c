use std::f32::consts::PI;
use std::fmt;

use dustrac_engine::coords::{Rect, Vec2};

use crate::collision::{Collidable, CollisionEvent};

/// Scene units travelled per second at 1 km/h.
const UNITS_PER_KMH: f32 = 1.5;

const CAR_SIZE: Vec2 = Vec2::new(32.0, 18.0);

const MAX_SPEED_KMH: f32 = 200.0;
const ACCELERATION_KMH_PER_S: f32 = 60.0;
const BRAKING_KMH_PER_S: f32 = 140.0;
const ROLLING_DRAG_KMH_PER_S: f32 = 10.0;
const TURN_RATE: f32 = 2.5;

const AI_CRUISE_KMH: f32 = 80.0;
const AI_TURN_RATE: f32 = 0.6;

/// Tire wear accumulated per scene unit travelled.
const TIRE_WEAR_PER_UNIT: f32 = 0.000_02;
const WALL_DAMAGE: f32 = 0.05;
const CAR_HIT_DAMAGE: f32 = 0.02;

/// Stable car identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CarId(pub u32);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Driver {
    Human,
    Computer,
}

/// Driver input for one step. Computer cars ignore it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    id: CarId,
    driver: Driver,
    position: Vec2,
    /// Radians, 0 = +X, growing clockwise on screen.
    heading: f32,
    speed_kmh: f32,
    tire_wear: f32,
    damage: f32,
}

impl Car {
    pub fn new(id: CarId, driver: Driver, position: Vec2, heading: f32) -> Self {
        Self {
            id,
            driver,
            position,
            heading,
            speed_kmh: 0.0,
            tire_wear: 0.0,
            damage: 0.0,
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn is_human(&self) -> bool {
        self.driver == Driver::Human
    }

    pub fn speed_kmh(&self) -> f32 {
        self.speed_kmh
    }

    pub fn set_speed_kmh(&mut self, speed: f32) {
        self.speed_kmh = speed.clamp(0.0, MAX_SPEED_KMH);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn tire_wear(&self) -> f32 {
        self.tire_wear
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, CAR_SIZE)
    }

    /// Restores tires and body, as done in the pit.
    pub fn repair(&mut self) {
        self.tire_wear = 0.0;
        self.damage = 0.0;
    }

    /// Advances the car by `dt` seconds.
    pub fn step(&mut self, dt: f32, controls: Controls) {
        match self.driver {
            Driver::Human => self.drive(dt, controls),
            Driver::Computer => {
                self.heading += AI_TURN_RATE * dt;
                self.set_speed_kmh(AI_CRUISE_KMH);
            }
        }

        let travelled = self.speed_kmh * UNITS_PER_KMH * dt;
        self.position += Vec2::from_angle(self.heading) * travelled;
        self.tire_wear = (self.tire_wear + travelled * TIRE_WEAR_PER_UNIT).min(1.0);
    }

    fn drive(&mut self, dt: f32, controls: Controls) {
        let mut speed = self.speed_kmh;
        if controls.accelerate {
            speed += ACCELERATION_KMH_PER_S * dt;
        } else {
            speed -= ROLLING_DRAG_KMH_PER_S * dt;
        }
        if controls.brake {
            speed -= BRAKING_KMH_PER_S * dt;
        }
        self.set_speed_kmh(speed);

        // No steering at a standstill.
        if self.speed_kmh > 0.0 {
            let steer = match (controls.left, controls.right) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };
            self.heading += steer * TURN_RATE * dt;
        }
    }

    pub fn collision_event(&mut self, event: &CollisionEvent<'_>) {
        match event.other {
            Collidable::Car(other) => {
                let impact = 1.0 + other.speed_kmh() / 100.0;
                self.add_damage(CAR_HIT_DAMAGE * impact);
            }
            Collidable::Wall => {
                self.heading = (self.heading + PI) % (2.0 * PI);
                self.set_speed_kmh(self.speed_kmh * 0.5);
                self.add_damage(WALL_DAMAGE);
            }
        }
    }

    /// Moves the car so its bounds lie within `area`.
    pub fn keep_inside(&mut self, area: Rect) {
        let half = CAR_SIZE * 0.5;
        let (min, max) = (area.origin + half, area.max() - half);
        self.position.x = self.position.x.max(min.x).min(max.x);
        self.position.y = self.position.y.max(min.y).min(max.y);
    }

    fn add_damage(&mut self, amount: f32) {
        self.damage = (self.damage + amount).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human() -> Car {
        Car::new(CarId(0), Driver::Human, Vec2::new(100.0, 100.0), 0.0)
    }

    #[test]
    fn speed_is_clamped() {
        let mut car = human();
        car.set_speed_kmh(-5.0);
        assert_eq!(car.speed_kmh(), 0.0);
        car.set_speed_kmh(1000.0);
        assert_eq!(car.speed_kmh(), MAX_SPEED_KMH);
    }

    #[test]
    fn accelerating_moves_forward() {
        let mut car = human();
        let controls = Controls {
            accelerate: true,
            ..Controls::default()
        };
        car.step(1.0, controls);
        assert_eq!(car.speed_kmh(), ACCELERATION_KMH_PER_S);
        assert!(car.position().x > 100.0);
        assert_eq!(car.position().y, 100.0);
        assert!(car.tire_wear() > 0.0);
    }

    #[test]
    fn standing_car_does_not_turn() {
        let mut car = human();
        let controls = Controls {
            left: true,
            ..Controls::default()
        };
        car.step(1.0, controls);
        assert_eq!(car.heading, 0.0);
    }

    #[test]
    fn computer_cars_cruise() {
        let mut car = Car::new(CarId(1), Driver::Computer, Vec2::zero(), 0.0);
        car.step(0.1, Controls::default());
        assert!(!car.is_human());
        assert_eq!(car.speed_kmh(), AI_CRUISE_KMH);
    }

    #[test]
    fn wall_hit_halves_speed_and_damages() {
        let mut car = human();
        car.set_speed_kmh(100.0);
        car.collision_event(&CollisionEvent::new(Collidable::Wall));
        assert_eq!(car.speed_kmh(), 50.0);
        assert!((car.damage() - WALL_DAMAGE).abs() < 1e-6);

        car.repair();
        assert_eq!(car.damage(), 0.0);
        assert_eq!(car.tire_wear(), 0.0);
    }

    #[test]
    fn keep_inside_pulls_the_bounds_back() {
        let area = Rect::new(0.0, 0.0, 1024.0, 768.0);
        let mut car = Car::new(CarId(0), Driver::Human, Vec2::new(1030.0, -4.0), 0.0);
        car.keep_inside(area);
        assert_eq!(car.position(), Vec2::new(1024.0 - 16.0, 9.0));

        let inside = Vec2::new(500.0, 300.0);
        car.set_position(inside);
        car.keep_inside(area);
        assert_eq!(car.position(), inside);
    }
}
