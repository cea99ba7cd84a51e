/// Default opening balance of the attention bank.
pub const DEFAULT_ATTENTION_BANK: f64 = 100_000.0;

/// Default STI floor (classic 16-bit attention-value range).
pub const DEFAULT_MIN_STI: i64 = -32_768;

/// Default STI ceiling.
pub const DEFAULT_MAX_STI: i64 = 32_767;

/// Default LTI ceiling.
pub const DEFAULT_MAX_LTI: i64 = 65_535;

/// Default per-cycle multiplicative decay applied to STI and LTI.
pub const DEFAULT_DECAY_RATE: f64 = 0.95;

/// Default fraction of a source's STI diffused across its edges per pass.
pub const DEFAULT_SPREADING_RATE: f64 = 0.2;

/// Default STI below which a non-VLTI entry is forgotten.
pub const DEFAULT_FORGETTING_THRESHOLD: i64 = -1_000;

/// Default fraction of positive STI taxed into the bank per cycle.
pub const DEFAULT_RENT_RATE: f64 = 0.01;

/// Default fraction of LTI paid out as STI wages per cycle.
pub const DEFAULT_WAGE_RATE: f64 = 0.05;

/// STI contribution per unit of node activation.
pub const ACTIVATION_STI_SCALE: f64 = 2_000.0;

/// STI contribution per unit of node attention.
pub const ATTENTION_STI_SCALE: f64 = 1_000.0;

/// STI contribution per historical activation, up to HISTORY_COUNT_CAP.
pub const HISTORY_STI_SCALE: f64 = 10.0;

/// Activation-count cap for the STI history term.
pub const HISTORY_COUNT_CAP: f64 = 100.0;

/// Flat STI bonus when a stimulus context names a category or task kind.
pub const CONTEXT_STI_BONUS: f64 = 200.0;

/// Recency half-life: one hour old halves the activation-derived STI.
pub const RECENCY_HALF_LIFE_MS: f64 = 3_600_000.0;

/// LTI cut above which an entry earns wages.
pub const WAGE_LTI_CUT: i64 = 1_000;

/// LTI contribution per log-unit of activation history.
pub const LTI_HISTORY_SCALE: f64 = 100.0;
