use canopy_ir::{
    arena::Arena,
    kind::Kind,
    position::{MAX_COLUMN, SourcePosition, decode_column, decode_line, encode},
};

#[test]
fn test_wide_columns_clamp() {
    assert_eq!(encode(5, 4096), encode(5, 4095));
    assert_eq!(decode_column(encode(5, 100_000)), MAX_COLUMN);
    assert_eq!(decode_line(encode(5, 100_000)), 5);
}

#[test]
fn test_negative_inputs_are_unknown() {
    assert_eq!(encode(-1, 3), -1);
    assert_eq!(encode(3, -1), -1);
    assert_eq!(decode_line(-1), -1);
    assert_eq!(decode_column(-1), -1);
}

#[test]
fn test_node_positions() {
    let mut arena = Arena::new();
    let placed = arena.new_node_at(Kind::Block, 40, 17).unwrap();
    let unplaced = arena.new_node(Kind::Block).unwrap();
    assert_eq!(arena.line(placed), 40);
    assert_eq!(arena.column(placed), 17);
    assert_eq!(arena.position(placed).to_string(), "40:17");
    assert_eq!(arena.line(unplaced), -1);
    assert_eq!(arena.position(unplaced).to_string(), "?");

    arena.copy_position_from(unplaced, placed);
    assert_eq!(arena.position(unplaced), SourcePosition::new(40, 17));

    arena.set_source_position(placed, SourcePosition::UNKNOWN);
    assert!(!arena.position(placed).is_known());
}
