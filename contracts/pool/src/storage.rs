// Pool storage module

use cl_tick::{BitmapStore, TickStore};
use soroban_sdk::{contracttype, Address, Env};

use crate::error::PoolError;
use crate::types::{Params, PoolState, Position, TickInfo};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Module admin (instance)
    Admin,
    /// Module parameters (instance)
    Params,
    /// Id handed to the next pool (instance)
    NextPoolId,
    Pool(u64),
    /// Tick record by (pool_id, tick)
    Tick(u64, i32),
    /// Bitmap word by (pool_id, level, word position)
    Bitmap(u64, u32, i32),
    /// Position by (pool_id, owner, lower_tick, upper_tick)
    Position(u64, Address, i32, i32),
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
/// Extend once the remaining TTL drops below this
const PERSISTENT_THRESHOLD: u32 = PERSISTENT_LIFETIME - 120_960;

const INSTANCE_LIFETIME: u32 = 518_400;
const INSTANCE_THRESHOLD: u32 = INSTANCE_LIFETIME - 17_280;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_THRESHOLD, PERSISTENT_LIFETIME);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_THRESHOLD, INSTANCE_LIFETIME);
}

// ============================================================
// ADMIN & PARAMS
// ============================================================

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(env: &Env) -> Result<Address, PoolError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(PoolError::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_params(env: &Env) -> Result<Params, PoolError> {
    env.storage()
        .instance()
        .get(&DataKey::Params)
        .ok_or(PoolError::NotInitialized)
}

pub fn write_params(env: &Env, params: &Params) {
    env.storage().instance().set(&DataKey::Params, params);
}

/// Pool ids start at 1
pub fn read_next_pool_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextPoolId)
        .unwrap_or(1)
}

pub fn write_next_pool_id(env: &Env, id: u64) {
    env.storage().instance().set(&DataKey::NextPoolId, &id);
}

// ============================================================
// POOLS
// ============================================================

pub fn read_pool(env: &Env, pool_id: u64) -> Result<PoolState, PoolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool_id))
        .ok_or(PoolError::PoolNotFound)
}

pub fn write_pool(env: &Env, pool: &PoolState) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    extend_ttl(env, &key);
}

// ============================================================
// POSITIONS
// ============================================================

pub fn read_position(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower: i32,
    upper: i32,
) -> Option<Position> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(pool_id, owner.clone(), lower, upper))
}

pub fn write_position(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower: i32,
    upper: i32,
    pos: &Position,
) {
    let key = DataKey::Position(pool_id, owner.clone(), lower, upper);
    env.storage().persistent().set(&key, pos);
    extend_ttl(env, &key);
}

pub fn remove_position(env: &Env, pool_id: u64, owner: &Address, lower: i32, upper: i32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(pool_id, owner.clone(), lower, upper));
}

/// Write the position back, or drop it once nothing is left in it
pub fn save_position(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower: i32,
    upper: i32,
    pos: &Position,
) {
    if pos.is_empty() {
        remove_position(env, pool_id, owner, lower, upper);
    } else {
        write_position(env, pool_id, owner, lower, upper, pos);
    }
}

// ============================================================
// TICKS & BITMAP
// ============================================================

/// Tick records of one pool in persistent storage
pub struct PoolTicks {
    env: Env,
    pool_id: u64,
}

impl PoolTicks {
    pub fn new(env: &Env, pool_id: u64) -> Self {
        Self {
            env: env.clone(),
            pool_id,
        }
    }
}

impl TickStore for PoolTicks {
    fn env(&self) -> &Env {
        &self.env
    }

    fn read_tick(&self, tick: i32) -> Option<TickInfo> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Tick(self.pool_id, tick))
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        let key = DataKey::Tick(self.pool_id, tick);
        self.env.storage().persistent().set(&key, info);
        extend_ttl(&self.env, &key);
    }

    fn remove_tick(&mut self, tick: i32) {
        self.env
            .storage()
            .persistent()
            .remove(&DataKey::Tick(self.pool_id, tick));
    }
}

/// Bitmap words of one pool; zero words are not stored
pub struct PoolBitmap {
    env: Env,
    pool_id: u64,
}

impl PoolBitmap {
    pub fn new(env: &Env, pool_id: u64) -> Self {
        Self {
            env: env.clone(),
            pool_id,
        }
    }
}

impl BitmapStore for PoolBitmap {
    fn read_word(&self, level: u32, pos: i32) -> u128 {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Bitmap(self.pool_id, level, pos))
            .unwrap_or(0)
    }

    fn write_word(&mut self, level: u32, pos: i32, word: u128) {
        let key = DataKey::Bitmap(self.pool_id, level, pos);
        if word == 0 {
            self.env.storage().persistent().remove(&key);
        } else {
            self.env.storage().persistent().set(&key, &word);
            extend_ttl(&self.env, &key);
        }
    }
}
