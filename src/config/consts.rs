// src/config/consts.rs

// Score bands (inclusive lower bounds)
pub const ENGAGEMENT_FLOOR: u32 = 20;
pub const EVOLVED_FLOOR: u32 = 50;
pub const FINAL_FLOOR: u32 = 75;
pub const ELITE_FLOOR: u32 = 100;

// A tracked participant at or above this score who drops to exactly 0 marks a reset
pub const ON_BOARD_THRESHOLD: u32 = ENGAGEMENT_FLOOR;

// Roster columns (fixed positions on the source table)
pub const COL_NAME: usize = 0;
pub const COL_PUZZLES: usize = 3;
pub const COL_SCORE: usize = 5;
pub const COL_RATING: usize = 6;
pub const COL_GROUP: usize = 7;
pub const MIN_ROW_CELLS: usize = 6;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const ASSIGNMENTS_FILE: &str = "assignments.json";
pub const CATALOG_SNAPSHOT_FILE: &str = "species-catalog.json";
pub const CATALOG_DUMP_FILE: &str = "species-dump.json";
pub const LOG_FILE: &str = "debug.log";

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_RECORDS_FILE: &str = "participants.json";
pub const UNKNOWN_SPECIES: &str = "Unknown";
pub const MAX_DELTA: u32 = 5;

// Net config
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "dex_scrape/0.3";
