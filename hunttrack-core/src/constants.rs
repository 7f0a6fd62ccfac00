//! Observed deployment constants for the tracked character project.
//!
//! These values pin the goal math to the deployment this tracker was built
//! for. Adjusting them is a code change reviewed in version control, not an
//! external setting.

// Character progression ------------------------------------------------------

/// Character level before the first recorded session.
pub const DEFAULT_INITIAL_LEVEL: i64 = 486;

// Goal conversion ------------------------------------------------------------

/// Real currency already invested in the project.
pub const DEFAULT_INITIAL_INVESTMENT: f64 = 578.40;

/// Real currency target for the project.
pub const DEFAULT_FINAL_GOAL: f64 = 10_000.00;

/// Average in-game currency units per tradeable token.
pub const GP_PER_TC: i64 = 36_500;

/// Real currency value of one tradeable token.
pub const VALUE_PER_TC: f64 = 0.224;

// Store layout ---------------------------------------------------------------

/// File name of the hunt store inside the data directory.
pub const HUNT_STORE_FILE: &str = "data.csv";

/// File name of the boss drop store inside the data directory.
pub const DROP_STORE_FILE: &str = "boss_drops.csv";
