use rand::Rng;

/// Source of randomness for tile spawning.
///
/// The session asks for an index into its list of empty cells and for the
/// value of the new tile, so tests can script exact spawn sequences.
pub trait TileSource {
    /// Picks an index in `0..candidates`. `candidates` is never zero.
    fn pick_cell(&mut self, candidates: usize) -> usize;

    /// Picks the value of a freshly spawned tile: 2 or 4, equally likely.
    fn pick_value(&mut self) -> u32;
}

/// Thread-local RNG backed source used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTileSource;

impl TileSource for RandomTileSource {
    fn pick_cell(&mut self, candidates: usize) -> usize {
        rand::thread_rng().gen_range(0..candidates)
    }

    fn pick_value(&mut self) -> u32 {
        rand::thread_rng().gen_range(1..=2) * 2
    }
}
