//! Static tip pool and the injectable picker behind tip-of-day selection.

use rand::Rng;

/// Fixed pool of energy-saving tips; each generation pass surfaces one.
pub const TIPS: [&str; 6] = [
    "Run the dishwasher and washing machine in off-peak hours to cut your bill.",
    "Unplug chargers and standby appliances; phantom load adds up over a month.",
    "Move one degree on the thermostat: lower in winter, higher in summer.",
    "Batch your oven use and cook several dishes while it is already hot.",
    "Prefer cold-water programs on the washing machine whenever possible.",
    "Check today's price curve before switching on high-consumption appliances.",
];

/// Picks which tip a generation pass surfaces.
///
/// Injected so tests can pin the choice instead of relying on a random
/// draw.
pub trait TipPicker: Send + Sync {
    /// Index into a pool of `len` tips.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random selection.
#[derive(Debug, Default)]
pub struct RandomTipPicker;

impl TipPicker for RandomTipPicker {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index (modulo pool size).
#[derive(Debug)]
pub struct FixedTipPicker(pub usize);

impl TipPicker for FixedTipPicker {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0 % len
    }
}
