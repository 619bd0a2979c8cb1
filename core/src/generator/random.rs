use super::*;

/// Picks a random base color and a uniformly random odd cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, spec: GridSpec) -> Grid {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let base = Rgb::random(&mut rng);
        let odd_index = rng.random_range(0..spec.total_cells());

        log::trace!(
            "generated {0}x{0} grid, base {1}, odd cell {2}",
            spec.dimension,
            base,
            odd_index
        );
        Grid::new(spec, base, odd_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn exactly_one_odd_cell_with_adjusted_color() {
        for level in [1, 2, 7, 18, 40] {
            let spec = GridSpec::for_level(level);
            for seed in 0..50 {
                let grid = RandomGridGenerator::new(seed).generate(spec);
                let cells: Vec<_> = grid.cells().collect();
                assert_eq!(cells.len(), usize::from(spec.total_cells()));

                let odd: Vec<_> = cells.iter().filter(|cell| cell.is_odd).collect();
                assert_eq!(odd.len(), 1);
                assert_eq!(odd[0].color, grid.base_color().adjust(spec.color_delta));
                assert!(
                    cells
                        .iter()
                        .filter(|cell| !cell.is_odd)
                        .all(|cell| cell.color == grid.base_color())
                );
            }
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let spec = GridSpec::for_level(9);
        assert_eq!(
            RandomGridGenerator::new(42).generate(spec),
            RandomGridGenerator::new(42).generate(spec)
        );
    }

    #[test]
    fn odd_cell_lands_everywhere_eventually() {
        let spec = GridSpec::for_level(1);
        let mut seen = [false; 4];
        for seed in 0..200 {
            let grid = RandomGridGenerator::new(seed).generate(spec);
            seen[usize::from(grid.odd_index())] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }
}
