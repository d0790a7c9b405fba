use canopy_ir::{
    arena::Arena,
    errors::SourceMapError,
    source_map::{FilePosition, SourceMapRecorder},
};

use crate::utils::function_script;

#[test]
fn test_printer_walk_records_every_placed_node() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let script = function_script(&mut arena, "f")?;
    let nodes: Vec<_> = arena.preorder(script).collect();
    for (line, &id) in (0..).zip(&nodes) {
        arena.set_position(id, line, 0);
    }

    let mut recorder = SourceMapRecorder::new();
    for (column, &id) in (0u32..).zip(&nodes) {
        let start = FilePosition::new(0, column * 4);
        recorder.add_mapping(&arena, id, start, FilePosition::new(0, column * 4 + 3))?;
    }
    assert_eq!(recorder.len(), nodes.len());
    let names: Vec<_> = recorder
        .mappings()
        .iter()
        .filter_map(|mapping| mapping.original_name.as_deref())
        .collect();
    assert_eq!(names, vec!["f"]);
    Ok(())
}

#[test]
fn test_equal_starts_are_accepted() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let script = function_script(&mut arena, "f")?;
    arena.set_position(script, 0, 0);
    let mut recorder = SourceMapRecorder::new();
    let at = FilePosition::new(1, 1);
    recorder.add_mapping(&arena, script, at, at)?;
    recorder.add_mapping(&arena, script, at, FilePosition::new(1, 5))?;
    assert_eq!(recorder.len(), 2);
    Ok(())
}

#[test]
fn test_regression_aborts_for_good() -> anyhow::Result<()> {
    let mut arena = Arena::new();
    let script = function_script(&mut arena, "f")?;
    arena.set_position(script, 0, 0);
    let mut recorder = SourceMapRecorder::new();
    recorder.add_mapping(&arena, script, FilePosition::new(2, 0), FilePosition::new(2, 4))?;

    let err = recorder
        .add_mapping(&arena, script, FilePosition::new(1, 8), FilePosition::new(2, 0))
        .unwrap_err();
    assert!(matches!(err, SourceMapError::OrderingViolation { .. }));
    assert!(recorder.is_aborted());
    assert_eq!(
        recorder.add_mapping(&arena, script, FilePosition::new(9, 0), FilePosition::new(9, 1)),
        Err(SourceMapError::Aborted)
    );
    assert_eq!(recorder.len(), 1);
    Ok(())
}
