//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Seeded per-room channel models and the batch generator."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::f64::consts::PI;

use chrono::NaiveDateTime;
use rand::prelude::*;
use rand_distr::StandardNormal;
use smart_office_common::config::{SensorBounds, SimulationConfig};
use tracing::{debug, info};

use crate::calendar::{
    day_fraction, is_night, is_transition_hour, is_weekday, is_weekend_peak_window, is_work_hour,
};
use crate::error::SimError;
use crate::readings::{round_to, SensorChannel, SensorReading};
use crate::time_index::TimeWindow;

const TEMPERATURE_MEAN_C: f64 = 22.5;
const TEMPERATURE_SWING_C: f64 = 2.5;
const WORK_HOUR_WARMING_C: f64 = 0.6;
const NIGHT_COOLING_C: f64 = 1.0;

const OFFICE_LIGHTING_LUX: f64 = 500.0;
const IDLE_LIGHTING_LUX: f64 = 50.0;

const WORK_HOUR_OCCUPANCY: f64 = 0.85;
const TRANSITION_OCCUPANCY: f64 = 0.35;
const OFF_HOURS_OCCUPANCY: f64 = 0.05;
const WEEKEND_OCCUPANCY: f64 = 0.03;
const WEEKEND_PEAK_CHANCE: f64 = 0.06;
const WEEKEND_PEAK_OCCUPANCY: f64 = 0.7;

const HUMIDITY_BASELINE_PCT: f64 = 50.0;
const OCCUPIED_HUMIDITY_PCT: f64 = 3.0;

/// Batch generator producing one [`SensorReading`] per room and timestep.
#[derive(Debug, Clone)]
pub struct SensorDataGenerator {
    window: TimeWindow,
    rooms: u32,
    seed: u64,
    bounds: SensorBounds,
}

impl SensorDataGenerator {
    pub fn new(window: TimeWindow, rooms: u32, seed: u64, bounds: SensorBounds) -> Result<Self, SimError> {
        if rooms == 0 {
            return Err(SimError::NoRooms);
        }
        Ok(Self {
            window,
            rooms,
            seed,
            bounds,
        })
    }

    pub fn from_config(config: &SimulationConfig, start: NaiveDateTime) -> Result<Self, SimError> {
        let window = TimeWindow::new(start, config.duration, config.interval)?;
        Self::new(window, config.rooms, config.seed, config.bounds.clone())
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn rooms(&self) -> u32 {
        self.rooms
    }

    /// All readings ordered by timestamp, then room.
    pub fn generate(&self) -> Vec<SensorReading> {
        info!(
            start = %self.window.start(),
            steps = self.window.len(),
            rooms = self.rooms,
            seed = self.seed,
            "generating sensor readings"
        );
        let mut per_room: Vec<_> = (1..=self.rooms)
            .map(|room| self.simulate_room(room).into_iter())
            .collect();

        let mut readings = Vec::with_capacity(self.window.len() * per_room.len());
        for _ in 0..self.window.len() {
            for room in per_room.iter_mut() {
                readings.extend(room.next());
            }
        }
        readings
    }

    /// Readings for a single room, driven by a generator seeded with `seed + room`.
    pub fn simulate_room(&self, room: u32) -> Vec<SensorReading> {
        let mut model = RoomModel::new(self.seed.wrapping_add(u64::from(room)), &self.bounds);
        let timestamps: Vec<_> = self.window.timestamps().collect();

        // Channels are drawn one after another so each keeps a stable slice of the stream.
        let temperature: Vec<f64> = timestamps.iter().map(|ts| model.temperature(ts)).collect();
        let luminosity: Vec<f64> = timestamps.iter().map(|ts| model.luminosity(ts)).collect();
        let occupancy: Vec<u8> = timestamps.iter().map(|ts| model.occupancy(ts)).collect();
        let humidity: Vec<f64> = timestamps
            .iter()
            .zip(&occupancy)
            .map(|(ts, occupied)| model.humidity(ts, *occupied == 1))
            .collect();

        debug!(
            room,
            samples = timestamps.len(),
            occupied = occupancy.iter().filter(|o| **o == 1).count(),
            "room simulated"
        );

        timestamps
            .into_iter()
            .enumerate()
            .map(|(i, timestamp)| SensorReading {
                timestamp,
                room,
                occupancy: occupancy[i],
                luminosity_lux: luminosity[i],
                temperature_c: temperature[i],
                humidity_pct: humidity[i],
            })
            .collect()
    }
}

struct RoomModel<'a> {
    rng: StdRng,
    bounds: &'a SensorBounds,
}

impl<'a> RoomModel<'a> {
    fn new(seed: u64, bounds: &'a SensorBounds) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bounds,
        }
    }

    fn gaussian(&mut self, mean: f64, sigma: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + sigma * z
    }

    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Smooth daily cycle peaking at midday, warmer while staffed, cooler at night.
    fn temperature(&mut self, ts: &NaiveDateTime) -> f64 {
        let radians = day_fraction(ts) * 2.0 * PI;
        let mut value = TEMPERATURE_MEAN_C + TEMPERATURE_SWING_C * (radians - PI / 2.0).sin();
        if is_work_hour(ts) {
            value += WORK_HOUR_WARMING_C + self.gaussian(0.0, 0.2);
        }
        if is_night(ts) {
            value -= NIGHT_COOLING_C + self.gaussian(0.0, 0.2);
        }
        value += self.gaussian(0.0, 0.3);
        self.record(SensorChannel::Temperature, value)
    }

    fn luminosity(&mut self, ts: &NaiveDateTime) -> f64 {
        let value = if is_night(ts) {
            0.0
        } else if is_work_hour(ts) {
            self.gaussian(OFFICE_LIGHTING_LUX, 60.0)
        } else {
            self.gaussian(IDLE_LIGHTING_LUX, 30.0)
        };
        self.record(SensorChannel::Luminosity, value.max(0.0))
    }

    fn occupancy(&mut self, ts: &NaiveDateTime) -> u8 {
        let mut probability = if !is_weekday(ts) {
            WEEKEND_OCCUPANCY
        } else if is_work_hour(ts) {
            WORK_HOUR_OCCUPANCY
        } else if is_transition_hour(ts) {
            TRANSITION_OCCUPANCY
        } else {
            OFF_HOURS_OCCUPANCY
        };
        if is_weekend_peak_window(ts) && self.uniform() < WEEKEND_PEAK_CHANCE {
            probability = WEEKEND_PEAK_OCCUPANCY;
        }
        u8::from(self.uniform() < probability)
    }

    fn humidity(&mut self, ts: &NaiveDateTime, occupied: bool) -> f64 {
        let fraction = day_fraction(ts);
        let radians = fraction * 2.0 * PI;
        let daily = if (0.3..=0.7).contains(&fraction) {
            radians.sin().max(0.0) * 25.0 + 65.0
        } else {
            radians.cos().max(0.0) * 30.0 + 60.0
        };
        let mut value = HUMIDITY_BASELINE_PCT + (daily - 60.0) * 0.5;
        if occupied {
            value += OCCUPIED_HUMIDITY_PCT;
        }
        value += self.gaussian(0.0, 1.5);
        self.record(SensorChannel::Humidity, value)
    }

    fn record(&self, channel: SensorChannel, value: f64) -> f64 {
        let rounded = round_to(value, channel.decimals());
        match channel {
            SensorChannel::Temperature => self.bounds.temperature.clamp(rounded),
            SensorChannel::Luminosity => self.bounds.luminosity.clamp(rounded),
            SensorChannel::Humidity => self.bounds.humidity.clamp(rounded),
            SensorChannel::Occupancy => rounded,
        }
    }
}
