use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_new() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.row, 7);
    assert_eq!(pos.col, 7);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center
    assert_eq!(pos.to_index(), 7 * 15 + 7);
    assert_eq!(pos.to_index(), 112);

    let pos2 = Pos::from_index(112);
    assert_eq!(pos2.row, 7);
    assert_eq!(pos2.col, 7);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(14, 14));
    assert!(Pos::is_valid(7, 7));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(15, 0));
    assert!(!Pos::is_valid(0, 15));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 15);
    assert_eq!(TOTAL_CELLS, 225);
}

#[test]
fn test_pos_corner_indices() {
    // Top-left
    assert_eq!(Pos::new(0, 0).to_index(), 0);
    // Top-right
    assert_eq!(Pos::new(0, 14).to_index(), 14);
    // Bottom-left
    assert_eq!(Pos::new(14, 0).to_index(), 210);
    // Bottom-right
    assert_eq!(Pos::new(14, 14).to_index(), 224);
}

#[test]
fn test_bitboard_set_get_clear() {
    let mut bb = Bitboard::new();
    let pos = Pos::new(10, 3);

    assert!(!bb.get(pos));
    bb.set(pos);
    assert!(bb.get(pos));
    assert_eq!(bb.count(), 1);

    bb.clear(pos);
    assert!(!bb.get(pos));
    assert!(bb.is_empty());
}

#[test]
fn test_bitboard_last_cell() {
    // Index 224 lands in the fourth word
    let mut bb = Bitboard::new();
    bb.set(Pos::new(14, 14));
    assert!(bb.get(Pos::new(14, 14)));
    assert!(!bb.get(Pos::new(14, 13)));
    assert_eq!(bb.count(), 1);
}

#[test]
fn test_board_place_and_get() {
    let mut board = Board::new();
    let pos = Pos::new(7, 7);

    assert_eq!(board.get(pos), Stone::Empty);
    assert!(board.is_empty(pos));

    board.place_stone(pos, Stone::Black);
    assert_eq!(board.get(pos), Stone::Black);
    assert!(!board.is_empty(pos));

    board.remove_stone(pos);
    assert_eq!(board.get(pos), Stone::Empty);
}

#[test]
fn test_board_place_empty_is_noop() {
    let mut board = Board::new();
    board.place_stone(Pos::new(3, 3), Stone::Empty);
    assert!(board.is_board_empty());
}

#[test]
fn test_board_reset() {
    let mut board = Board::new();
    board.place_stone(Pos::new(0, 0), Stone::Black);
    board.place_stone(Pos::new(14, 14), Stone::White);
    assert_eq!(board.stone_count(), 2);

    board.reset();
    assert!(board.is_board_empty());
    assert_eq!(board.get(Pos::new(0, 0)), Stone::Empty);
    assert_eq!(board.get(Pos::new(14, 14)), Stone::Empty);
}
