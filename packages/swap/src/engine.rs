use cl_math::{
    add_delta, compute_swap_step, sqrt_price_to_tick, tick_to_sqrt_price, Dec, MathError,
    MAX_SQRT_PRICE, MIN_SQRT_PRICE,
};
use cl_tick::{accrue, cross_tick, next_initialized_tick, BitmapStore, TickInfo, TickStore};
use soroban_sdk::{log, Env, Map};

use crate::error::SwapError;
use crate::types::{SwapKind, SwapOutcome, SwapState, SwapStatus};

// ============================================================
// TICK OVERLAY
// ============================================================

/// Tick reads fall through to the base store; writes stay in memory
/// until the owner decides to commit them.
pub struct OverlayTicks<'a, T: TickStore> {
    base: &'a T,
    writes: Map<i32, Option<TickInfo>>,
}

impl<'a, T: TickStore> OverlayTicks<'a, T> {
    pub fn new(base: &'a T) -> Self {
        let writes = Map::new(base.env());
        Self { base, writes }
    }

    pub fn into_writes(self) -> Map<i32, Option<TickInfo>> {
        self.writes
    }
}

impl<'a, T: TickStore> TickStore for OverlayTicks<'a, T> {
    fn env(&self) -> &Env {
        self.base.env()
    }

    fn read_tick(&self, tick: i32) -> Option<TickInfo> {
        match self.writes.get(tick) {
            Some(pending) => pending,
            None => self.base.read_tick(tick),
        }
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        self.writes.set(tick, Some(info.clone()));
    }

    fn remove_tick(&mut self, tick: i32) {
        self.writes.set(tick, None);
    }
}

/// Apply the tick writes of a completed swap
pub fn commit_tick_writes<T: TickStore>(store: &mut T, writes: &Map<i32, Option<TickInfo>>) {
    for (tick, pending) in writes.iter() {
        match pending {
            Some(info) => store.write_tick(tick, &info),
            None => store.remove_tick(tick),
        }
    }
}

// ============================================================
// SWAP EXECUTOR
// ============================================================

/// Steps a swap across initialized ticks until the amount is used up,
/// the price limit is reached, or liquidity runs out.
pub struct SwapExecutor<'a, T: TickStore, B: BitmapStore> {
    env: Env,
    state: SwapState,
    ticks: OverlayTicks<'a, T>,
    bitmap: &'a B,
    kind: SwapKind,
    zero_for_one: bool,
    sqrt_price_limit: Dec,
    amount_remaining: u128,
    amount_in: u128,
    amount_out: u128,
    fee_amount: u128,
    ticks_crossed: u32,
    status: SwapStatus,
}

impl<'a, T: TickStore, B: BitmapStore> SwapExecutor<'a, T, B> {
    /// Validate the request against the working copy.
    ///
    /// Without an explicit limit the swap may run to the price bound in
    /// its direction.
    pub fn new(
        state: SwapState,
        ticks: &'a T,
        bitmap: &'a B,
        kind: SwapKind,
        zero_for_one: bool,
        amount: u128,
        sqrt_price_limit: Option<Dec>,
    ) -> Result<Self, SwapError> {
        if amount == 0 {
            return Err(SwapError::ZeroAmount);
        }

        let limit = if zero_for_one {
            let limit = sqrt_price_limit.unwrap_or(MIN_SQRT_PRICE);
            if limit < MIN_SQRT_PRICE || limit >= state.sqrt_price {
                return Err(SwapError::InvalidPriceLimit);
            }
            limit
        } else {
            let limit = sqrt_price_limit.unwrap_or(MAX_SQRT_PRICE);
            if limit > MAX_SQRT_PRICE || limit <= state.sqrt_price {
                return Err(SwapError::InvalidPriceLimit);
            }
            limit
        };

        Ok(Self {
            env: ticks.env().clone(),
            state,
            ticks: OverlayTicks::new(ticks),
            bitmap,
            kind,
            zero_for_one,
            sqrt_price_limit: limit,
            amount_remaining: amount,
            amount_in: 0,
            amount_out: 0,
            fee_amount: 0,
            ticks_crossed: 0,
            status: SwapStatus::Active,
        })
    }

    pub fn status(&self) -> SwapStatus {
        self.status
    }

    pub fn state(&self) -> &SwapState {
        &self.state
    }

    /// Advance by one step; a terminal status never changes again
    pub fn step(&mut self) -> SwapStatus {
        if self.status == SwapStatus::Active {
            self.status = match self.try_step() {
                Ok(status) => status,
                Err(err) => SwapStatus::Failed(err),
            };
        }
        self.status
    }

    /// Step until the swap completes or fails
    pub fn run(mut self) -> Result<SwapOutcome, SwapError> {
        while self.step() == SwapStatus::Active {}

        match self.status {
            SwapStatus::Completed => Ok(SwapOutcome {
                amount_in: self.amount_in,
                amount_out: self.amount_out,
                fee_amount: self.fee_amount,
                ticks_crossed: self.ticks_crossed,
                state: self.state,
                tick_writes: self.ticks.into_writes(),
            }),
            SwapStatus::Failed(err) => Err(err),
            SwapStatus::Active => Err(SwapError::NoProgress),
        }
    }

    fn try_step(&mut self) -> Result<SwapStatus, SwapError> {
        if self.amount_remaining == 0 || self.state.sqrt_price == self.sqrt_price_limit {
            return Ok(SwapStatus::Completed);
        }

        let next_tick = next_initialized_tick(
            self.bitmap,
            self.state.current_tick,
            self.state.tick_spacing,
            self.zero_for_one,
        )
        .ok_or(SwapError::InsufficientLiquidity)?;
        let tick_price = tick_to_sqrt_price(next_tick)?;

        let target = if self.zero_for_one {
            tick_price.max(self.sqrt_price_limit)
        } else {
            tick_price.min(self.sqrt_price_limit)
        };

        let exact_in = self.kind == SwapKind::ExactIn;
        let step = compute_swap_step(
            self.state.sqrt_price,
            target,
            self.state.liquidity,
            self.amount_remaining,
            self.state.spread_factor,
            exact_in,
        )?;

        log!(
            &self.env,
            "swap step",
            next_tick,
            step.amount_in,
            step.amount_out,
            step.fee_amount
        );

        let charged = step
            .amount_in
            .checked_add(step.fee_amount)
            .ok_or(MathError::Overflow)?;
        let remaining_before = self.amount_remaining;
        self.amount_remaining = if exact_in {
            self.amount_remaining.saturating_sub(charged)
        } else {
            self.amount_remaining.saturating_sub(step.amount_out)
        };
        self.amount_in = self
            .amount_in
            .checked_add(charged)
            .ok_or(MathError::Overflow)?;
        self.amount_out = self
            .amount_out
            .checked_add(step.amount_out)
            .ok_or(MathError::Overflow)?;
        self.fee_amount = self
            .fee_amount
            .checked_add(step.fee_amount)
            .ok_or(MathError::Overflow)?;

        // Fees are paid in the input token
        let global = &mut self.state.global;
        if self.zero_for_one {
            global.fee_0 = accrue(global.fee_0, step.fee_amount, self.state.liquidity)?;
        } else {
            global.fee_1 = accrue(global.fee_1, step.fee_amount, self.state.liquidity)?;
        }

        let price_moved = step.sqrt_price_next != self.state.sqrt_price;
        self.state.sqrt_price = step.sqrt_price_next;

        let crossed = step.sqrt_price_next == tick_price;
        if crossed {
            let net = cross_tick(&mut self.ticks, next_tick, &self.state.global)?;
            let delta = if self.zero_for_one {
                net.checked_neg().ok_or(MathError::Overflow)?
            } else {
                net
            };
            self.state.liquidity = add_delta(self.state.liquidity, delta)?;
            // Moving down leaves the pool on the tick just below the boundary
            self.state.current_tick = if self.zero_for_one { next_tick - 1 } else { next_tick };
            self.ticks_crossed += 1;
        } else if price_moved {
            self.state.current_tick = sqrt_price_to_tick(self.state.sqrt_price)?;
        }

        if !crossed && !price_moved && self.amount_remaining == remaining_before {
            return Err(SwapError::NoProgress);
        }

        if self.amount_remaining == 0 || self.state.sqrt_price == self.sqrt_price_limit {
            Ok(SwapStatus::Completed)
        } else {
            Ok(SwapStatus::Active)
        }
    }
}
