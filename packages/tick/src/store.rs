// Tick Storage Seam

use soroban_sdk::{Env, Map};

use crate::types::TickInfo;

/// Storage trait for tick records.
/// Lets tick updates and swaps run against contract storage or an
/// in-memory overlay alike.
pub trait TickStore {
    fn env(&self) -> &Env;
    fn read_tick(&self, tick: i32) -> Option<TickInfo>;
    fn write_tick(&mut self, tick: i32, info: &TickInfo);
    fn remove_tick(&mut self, tick: i32);
}

/// Tick records held in a host map
#[derive(Clone)]
pub struct MemoryTicks {
    env: Env,
    ticks: Map<i32, TickInfo>,
}

impl MemoryTicks {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            ticks: Map::new(env),
        }
    }

    pub fn len(&self) -> u32 {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl TickStore for MemoryTicks {
    fn env(&self) -> &Env {
        &self.env
    }

    fn read_tick(&self, tick: i32) -> Option<TickInfo> {
        self.ticks.get(tick)
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        self.ticks.set(tick, info.clone());
    }

    fn remove_tick(&mut self, tick: i32) {
        self.ticks.remove(tick);
    }
}
