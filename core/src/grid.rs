use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_DIMENSION: Coord = 2;
pub const MAX_DIMENSION: Coord = 10;
pub const MIN_CELL_PX: Pixels = 40;
pub const MAX_CELL_PX: Pixels = 90;
pub const MIN_COLOR_DELTA: ColorDelta = 10;
pub const MAX_COLOR_DELTA: ColorDelta = 40;

/// Grid shape and difficulty for one level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub dimension: Coord,
    pub cell_px: Pixels,
    pub color_delta: ColorDelta,
}

impl GridSpec {
    /// The grid grows every two levels while cells shrink and colors converge, each bounded so high levels stay
    /// playable.
    pub fn for_level(level: Level) -> Self {
        let level = i64::from(level.max(1));

        let dimension = (i64::from(MIN_DIMENSION) + (level - 1) / 2).min(i64::from(MAX_DIMENSION));
        let cell_px = if dimension == i64::from(MAX_DIMENSION) {
            i64::from(MIN_CELL_PX)
        } else {
            (i64::from(MAX_CELL_PX) - level * 4).max(i64::from(MIN_CELL_PX))
        };
        let color_delta = (i64::from(MAX_COLOR_DELTA) - level * 2).max(i64::from(MIN_COLOR_DELTA));

        Self {
            dimension: dimension as Coord,
            cell_px: cell_px as Pixels,
            color_delta: color_delta as ColorDelta,
        }
    }

    pub const fn total_cells(&self) -> CellIndex {
        cell_count(self.dimension)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub index: CellIndex,
    pub is_odd: bool,
    pub color: Rgb,
}

/// A generated board: every cell shares `base` except the one at `odd_index`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    spec: GridSpec,
    base: Rgb,
    odd_index: CellIndex,
    colors: Array2<Rgb>,
}

impl Grid {
    pub(crate) fn new(spec: GridSpec, base: Rgb, odd_index: CellIndex) -> Self {
        let dimension = usize::from(spec.dimension);
        let mut colors = Array2::from_elem((dimension, dimension), base);
        colors[odd_index.to_nd_index(spec.dimension)] = base.adjust(spec.color_delta);
        Self {
            spec,
            base,
            odd_index,
            colors,
        }
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn base_color(&self) -> Rgb {
        self.base
    }

    pub fn odd_color(&self) -> Rgb {
        self.colors[self.odd_index.to_nd_index(self.spec.dimension)]
    }

    pub fn odd_index(&self) -> CellIndex {
        self.odd_index
    }

    pub fn total_cells(&self) -> CellIndex {
        self.spec.total_cells()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidCell)
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        let index = self.validate_index(index).ok()?;
        Some(self.make_cell(index, self.colors[index.to_nd_index(self.spec.dimension)]))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.colors
            .iter()
            .enumerate()
            .map(|(index, &color)| self.make_cell(index as CellIndex, color))
    }

    /// Cells grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        let dimension = usize::from(self.spec.dimension);
        self.colors.outer_iter().enumerate().map(move |(y, row)| {
            row.into_iter()
                .enumerate()
                .map(move |(x, &color)| self.make_cell((y * dimension + x) as CellIndex, color))
        })
    }

    fn make_cell(&self, index: CellIndex, color: Rgb) -> Cell {
        Cell {
            index,
            is_odd: index == self.odd_index,
            color,
        }
    }
}
