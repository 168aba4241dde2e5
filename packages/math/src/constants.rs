// SPDX-License-Identifier: MIT
// Engine Constants

// ============================================================
// DECIMAL
// ============================================================

/// Fractional digits carried by `Dec`
pub const DEC_DECIMALS: u32 = 36;

/// Raw representation of 1.0 (10^36)
pub const DEC_ONE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

// ============================================================
// TICK BOUNDS
// ============================================================

/// Lowest tick; price = 1.0001^MIN_TICK
pub const MIN_TICK: i32 = -887272;

/// Highest tick; price = 1.0001^MAX_TICK
pub const MAX_TICK: i32 = 887272;

/// `tick_to_sqrt_price(MIN_TICK)` as raw `Dec` halves (hi, lo)
pub const MIN_SQRT_PRICE_RAW: (u128, u128) = (0, 54212146310449514);

/// `tick_to_sqrt_price(MAX_TICK)` as raw `Dec` halves (hi, lo)
pub const MAX_SQRT_PRICE_RAW: (u128, u128) = (
    54208071014691974,
    228261938315334203528933710027647871235,
);

/// `sqrt(1.0001)^(2^i)` for i in 0..20, raw `Dec` halves (hi, lo).
/// Bits of |tick| select which factors enter the product.
pub const SQRT_POWERS: [(u128, u128); 20] = [
    (0, 1000049998750062496094023416993798697),
    (0, 1000100000000000000000000000000000000),
    (0, 1000200010000000000000000000000000000),
    (0, 1000400060004000100000000000000000000),
    (0, 1000800280056007000560028000800010000),
    (0, 1001601200560182043688009144128711441),
    (0, 1003204964963598014666528690811055253),
    (0, 1006420201727613920156533908409419273),
    (0, 1012881622445451097078095631935005571),
    (0, 1025929181087729343658708608578965861),
    (0, 1052530684607338948386589370372923836),
    (0, 1107820842039993613899215811078813988),
    (0, 1227267018058200482050503815090808830),
    (0, 1506184333613467388107955981199151720),
    (0, 2268591246822644826925609859343607240),
    (0, 5146506245160322222537991751503863982),
    (0, 26486526531474198664033811812785769605),
    (2, 20971353860609718026268273630258012340),
    (1446, 104579781234015465644179432018161251825),
    (711804322, 129627235061302664818553850035617072813),
];

// ============================================================
// TICK INDEX
// ============================================================

/// Bits per bitmap word
pub const WORD_BITS: i32 = 128;

/// log2(WORD_BITS)
pub const WORD_SHIFT: u32 = 7;

// ============================================================
// POOL PARAMETERS
// ============================================================

/// Tick spacings a fresh deployment authorizes
pub const DEFAULT_TICK_SPACINGS: [u32; 4] = [1, 10, 100, 1000];

/// Spread factors a fresh deployment authorizes, in basis points
pub const DEFAULT_SPREAD_FACTORS_BPS: [u32; 8] = [0, 1, 5, 10, 20, 30, 50, 100];

/// Incentive tracks a pool may carry by default
pub const DEFAULT_MAX_INCENTIVE_TRACKS: u32 = 8;

/// Upper bound on rows returned by a paginated query
pub const MAX_PAGE_LIMIT: u32 = 100;
