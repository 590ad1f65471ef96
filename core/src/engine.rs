use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Transitions: `InProgress -> Lost` and `InProgress -> Won`, both final.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Lost,
    Won,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameOutcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Whether the hazards of a board have been fixed yet.
///
/// Valid transitions:
/// - Unseeded -> Seeded, on the first reveal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    Unseeded { seed: u64 },
    Seeded(HazardLayout),
}

impl Placement {
    pub const fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    pub fn layout(&self) -> Option<&HazardLayout> {
        match self {
            Self::Unseeded { .. } => None,
            Self::Seeded(layout) => Some(layout),
        }
    }

    fn seed_if_unseeded(&mut self, config: BoardConfig, exclude: Coord2) {
        if let Self::Unseeded { seed } = *self {
            let layout = RandomHazardGenerator::new(seed, exclude).generate(config);
            log::debug!(
                "Placed {} hazards with seed {}, excluding {:?}",
                layout.hazard_count(),
                seed,
                exclude
            );
            *self = Self::Seeded(layout);
        }
    }
}

/// Represents a game from the first move to a win or a loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    placement: Placement,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    outcome: GameOutcome,
    triggered_hazard: Option<Coord2>,
}

impl Board {
    /// Board whose hazards are placed from a fresh random seed on the first reveal.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::with_placement(config, Placement::Unseeded { seed })
    }

    /// Board with hazards already fixed; the first reveal gets no protection.
    pub fn from_layout(layout: HazardLayout) -> Self {
        Self::with_placement(layout.config(), Placement::Seeded(layout))
    }

    fn with_placement(config: BoardConfig, placement: Placement) -> Self {
        Self {
            config,
            placement,
            cells: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            outcome: Default::default(),
            triggered_hazard: None,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn hazards_placed(&self) -> bool {
        self.placement.is_seeded()
    }

    pub fn layout(&self) -> Option<&HazardLayout> {
        self.placement.layout()
    }

    pub fn total_hazards(&self) -> CellCount {
        self.config.hazards()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flagged_count
    }

    /// How many hazards have not been flagged yet, negative when over-flagged.
    pub fn hazards_left(&self) -> i64 {
        i64::from(self.config.hazards()) - i64::from(self.flagged_count)
    }

    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn progress(&self) -> Progress {
        Progress {
            revealed: self.revealed_count,
            total_safe: self.config.safe_cells(),
        }
    }

    /// Player-visible state of a cell, `None` when out of range.
    pub fn cell_at(&self, row: i64, col: i64) -> Option<CellView> {
        let coords = checked_coords(row, col, self.size())?;
        Some(match self.cells[coords.to_nd_index()] {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed => CellView::Revealed(self.layout()?[coords]),
        })
    }

    pub fn is_revealed(&self, row: i64, col: i64) -> bool {
        matches!(self.cell_at(row, col), Some(CellView::Revealed(_)))
    }

    pub fn is_flagged(&self, row: i64, col: i64) -> bool {
        matches!(self.cell_at(row, col), Some(CellView::Flagged))
    }

    /// Value of a cell regardless of whether it is revealed, `None` before hazards are placed.
    pub fn value_at(&self, row: i64, col: i64) -> Option<CellValue> {
        let coords = checked_coords(row, col, self.size())?;
        Some(self.layout()?[coords])
    }

    pub fn toggle_flag(&mut self, row: i64, col: i64) -> MarkOutcome {
        use CellState::*;
        use MarkOutcome::*;

        let Some(coords) = checked_coords(row, col, self.size()) else {
            return NoChange;
        };
        if self.outcome.is_finished() {
            return NoChange;
        }

        match self.cells[coords.to_nd_index()] {
            Hidden => {
                self.cells[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed => NoChange,
        }
    }

    /// Reveal a hidden cell, flooding through cells with no adjacent hazards.
    ///
    /// Out-of-range, flagged and already revealed cells are left alone, as is a finished board.
    pub fn reveal(&mut self, row: i64, col: i64) -> RevealOutcome {
        let Some(coords) = checked_coords(row, col, self.size()) else {
            return RevealOutcome::NoChange;
        };
        if self.outcome.is_finished()
            || !matches!(self.cells[coords.to_nd_index()], CellState::Hidden)
        {
            return RevealOutcome::NoChange;
        }

        self.placement.seed_if_unseeded(self.config, coords);
        let Placement::Seeded(layout) = &self.placement else {
            return RevealOutcome::NoChange;
        };

        if layout.contains_hazard(coords) {
            self.cells[coords.to_nd_index()] = CellState::Revealed;
            self.triggered_hazard = Some(coords);
            self.end_game(GameOutcome::Lost);
            return RevealOutcome::HitHazard;
        }

        let opened = flood_reveal(layout, &mut self.cells, coords);
        self.revealed_count += opened;
        log::debug!("Revealed {} cell(s) from {:?}", opened, coords);

        if self.revealed_count == self.config.safe_cells() {
            self.end_game(GameOutcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        if self.outcome.is_finished() {
            return;
        }
        log::debug!(
            "Game ended {:?} with {}/{} safe cells revealed",
            outcome,
            self.revealed_count,
            self.config.safe_cells()
        );
        self.outcome = outcome;
    }
}

/// Reveals the safe cell `start` and, when it has no adjacent hazards, every cell reachable from
/// it through zero-valued cells. Returns how many cells became revealed.
///
/// Cells are marked revealed before they are queued, so each one is queued at most once and the
/// worklist never outgrows the board. Flagged cells and hazards are never touched.
fn flood_reveal(layout: &HazardLayout, cells: &mut Array2<CellState>, start: Coord2) -> CellCount {
    cells[start.to_nd_index()] = CellState::Revealed;
    let mut opened = 1;

    if layout[start] != CellValue::Clear(0) {
        return opened;
    }

    let mut pending = vec![start];
    log::trace!("Starting flood-fill from {:?}", start);

    while let Some(coords) = pending.pop() {
        for pos in layout.iter_neighbors(coords) {
            if !matches!(cells[pos.to_nd_index()], CellState::Hidden) {
                continue;
            }

            let CellValue::Clear(count) = layout[pos] else {
                continue;
            };

            cells[pos.to_nd_index()] = CellState::Revealed;
            opened += 1;
            log::trace!("Flood revealed cell at {:?}, hazard count: {}", pos, count);

            if count == 0 {
                pending.push(pos);
            }
        }
    }

    opened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, hazards: &[Coord2]) -> HazardLayout {
        HazardLayout::from_hazard_coords(size, hazards).unwrap()
    }

    fn revealed_cells(board: &Board) -> Vec<(i64, i64)> {
        let (rows, cols) = board.size();
        let mut out = Vec::new();
        for row in 0..i64::from(rows) {
            for col in 0..i64::from(cols) {
                if board.is_revealed(row, col) {
                    out.push((row, col));
                }
            }
        }
        out
    }

    #[test]
    fn new_board_is_hidden_and_unseeded() {
        let board = Board::new(BoardConfig::new(4, 5, 3).unwrap());

        assert!(!board.hazards_placed());
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        assert!(revealed_cells(&board).is_empty());
        assert_eq!(board.value_at(0, 0), None);
        assert_eq!(board.cell_at(3, 4), Some(CellView::Hidden));
        assert_eq!(
            board.progress(),
            Progress {
                revealed: 0,
                total_safe: 17
            }
        );
    }

    #[test]
    fn first_reveal_seeds_and_is_safe() {
        for seed in 0..32 {
            let mut board = Board::with_seed(BoardConfig::new(5, 5, 20).unwrap(), seed);

            let outcome = board.reveal(2, 3);

            assert!(board.hazards_placed());
            assert_ne!(outcome, RevealOutcome::HitHazard);
            assert!(!board.layout().unwrap().contains_hazard((2, 3)));
            assert_eq!(board.layout().unwrap().iter_hazards().count(), 20);
        }
    }

    #[test]
    fn flagging_before_first_reveal_does_not_seed() {
        let mut board = Board::with_seed(BoardConfig::new(3, 3, 2).unwrap(), 1);

        assert_eq!(board.toggle_flag(1, 1), MarkOutcome::Changed);
        assert!(!board.hazards_placed());
        assert_eq!(board.reveal(1, 1), RevealOutcome::NoChange);
        assert!(!board.hazards_placed());
    }

    #[test]
    fn reveal_hits_hazard_and_sets_triggered_cell() {
        let mut board = Board::from_layout(layout((2, 2), &[(0, 0)]));

        let outcome = board.reveal(0, 0);

        assert_eq!(outcome, RevealOutcome::HitHazard);
        assert_eq!(board.outcome(), GameOutcome::Lost);
        assert_eq!(board.triggered_hazard(), Some((0, 0)));
        assert_eq!(board.cell_at(0, 0), Some(CellView::Revealed(CellValue::Hazard)));
        assert_eq!(board.progress().revealed, 0);
    }

    #[test]
    fn far_corner_floods_whole_safe_area() {
        let mut board = Board::from_layout(layout((3, 3), &[(0, 0)]));

        assert_eq!(board.reveal(2, 2), RevealOutcome::Won);

        assert_eq!(revealed_cells(&board).len(), 8);
        assert!(!board.is_revealed(0, 0));
        assert_eq!(board.cell_at(2, 2), Some(CellView::Revealed(CellValue::Clear(0))));
    }

    #[test]
    fn corner_next_to_hazard_reveals_only_itself() {
        let mut board = Board::from_layout(layout((3, 3), &[(0, 0)]));

        assert_eq!(board.reveal(1, 1), RevealOutcome::Revealed);

        assert_eq!(revealed_cells(&board), vec![(1, 1)]);
        assert_eq!(board.cell_at(1, 1), Some(CellView::Revealed(CellValue::Clear(1))));
    }

    #[test]
    fn flood_fill_opens_zero_region_and_border() {
        // H 1 0 0
        // 1 1 0 0
        // 0 0 0 0
        // 0 0 0 0
        let mut board = Board::from_layout(layout((4, 4), &[(0, 0)]));

        let outcome = board.reveal(2, 2);

        assert_eq!(outcome, RevealOutcome::Won);
        assert!(!board.is_revealed(0, 0));
        assert_eq!(revealed_cells(&board).len(), 15);
        assert_eq!(board.cell_at(1, 1), Some(CellView::Revealed(CellValue::Clear(1))));
    }

    #[test]
    fn flood_fill_routes_around_hazards_and_flags() {
        // 0 1 H 1 0
        // 0 1 1 1 0
        // 0 0 0 0 0
        // 1 1 0 0 0
        // H 1 0 0 0
        let mut board = Board::from_layout(layout((5, 5), &[(0, 2), (4, 0)]));
        board.toggle_flag(4, 4);

        assert_eq!(board.reveal(2, 2), RevealOutcome::Revealed);

        assert!(!board.is_revealed(0, 2));
        assert!(!board.is_revealed(4, 0));
        assert!(board.is_flagged(4, 4));
        assert_eq!(revealed_cells(&board).len(), 22);
        assert_eq!(board.progress().revealed, 22);

        assert_eq!(board.toggle_flag(4, 4), MarkOutcome::Changed);
        assert_eq!(board.reveal(4, 4), RevealOutcome::Won);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = Board::from_layout(layout((1, 5), &[(0, 4)]));
        board.toggle_flag(0, 1);

        assert_eq!(board.reveal(0, 0), RevealOutcome::Revealed);

        assert_eq!(revealed_cells(&board), vec![(0, 0)]);
        assert!(board.is_flagged(0, 1));
    }

    #[test]
    fn out_of_range_coords_are_noops() {
        let mut board = Board::with_seed(BoardConfig::new(3, 3, 1).unwrap(), 9);

        assert_eq!(board.reveal(-1, 0), RevealOutcome::NoChange);
        assert_eq!(board.reveal(0, 3), RevealOutcome::NoChange);
        assert_eq!(board.reveal(i64::MIN, i64::MAX), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag(3, 0), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag(0, -7), MarkOutcome::NoChange);
        assert!(!board.hazards_placed());
        assert_eq!(board.cell_at(5, 5), None);
    }

    #[test]
    fn reveal_twice_is_idempotent() {
        let mut board = Board::from_layout(layout((3, 3), &[(0, 0), (2, 2)]));

        assert_eq!(board.reveal(0, 2), RevealOutcome::Revealed);
        let snapshot = board.clone();
        assert_eq!(board.reveal(0, 2), RevealOutcome::NoChange);

        assert_eq!(board, snapshot);
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut board = Board::from_layout(layout((3, 3), &[(0, 0)]));
        let snapshot = board.clone();

        assert_eq!(board.toggle_flag(0, 0), MarkOutcome::Changed);
        assert!(board.is_flagged(0, 0));
        assert_eq!(board.flags_placed(), 1);
        assert_eq!(board.hazards_left(), 0);
        assert_eq!(board.toggle_flag(0, 0), MarkOutcome::Changed);

        assert_eq!(board, snapshot);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut board = Board::from_layout(layout((3, 3), &[(0, 0)]));
        board.reveal(1, 1);

        assert_eq!(board.toggle_flag(1, 1), MarkOutcome::NoChange);
        assert!(!board.is_flagged(1, 1));
    }

    #[test]
    fn flagged_cells_cannot_be_revealed_until_unflagged() {
        let mut board = Board::from_layout(layout((3, 3), &[(0, 0)]));
        board.toggle_flag(0, 0);

        assert_eq!(board.reveal(0, 0), RevealOutcome::NoChange);
        assert_eq!(board.outcome(), GameOutcome::InProgress);

        board.toggle_flag(0, 0);
        assert_eq!(board.reveal(0, 0), RevealOutcome::HitHazard);
    }

    #[test]
    fn densest_board_wins_on_first_reveal() {
        for seed in 0..16 {
            let mut board = Board::with_seed(BoardConfig::new(4, 6, 23).unwrap(), seed);

            assert_eq!(board.reveal(3, 1), RevealOutcome::Won);
            assert_eq!(board.outcome(), GameOutcome::Won);
            assert_eq!(board.value_at(3, 1), Some(CellValue::Clear(5)));
            assert!(board.progress().is_complete());
        }
    }

    #[test]
    fn finished_board_ignores_further_moves() {
        let mut board = Board::from_layout(layout((2, 2), &[(0, 0)]));
        board.reveal(0, 0);
        let snapshot = board.clone();

        assert_eq!(board.reveal(1, 1), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag(0, 1), MarkOutcome::NoChange);

        assert_eq!(board, snapshot);
    }

    #[test]
    fn winning_board_transitions_to_won_state() {
        let mut board = Board::from_layout(layout((2, 1), &[(0, 0)]));

        assert_eq!(board.reveal(1, 0), RevealOutcome::Won);
        assert_eq!(board.outcome(), GameOutcome::Won);
        assert!(board.is_finished());
        assert_eq!(board.triggered_hazard(), None);
    }

    #[test]
    fn board_survives_serialization_mid_game() {
        let mut board = Board::with_seed(BoardConfig::new(9, 9, 10).unwrap(), 3);
        board.reveal(4, 4);
        board.toggle_flag(0, 0);

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
    }
}
