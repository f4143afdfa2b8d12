#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tutorgrid_layout::{Axis, DropTarget, GridDocument, ResizeLine};

#[derive(Debug, Arbitrary)]
enum Op {
    Insert,
    Remove(u8),
    MoveTo { item: u8, row: u8, col: u8 },
    MoveBottom(u8),
    MoveRight(u8),
    Resize { item: u8, row_axis: bool, line: u8, delta: i8 },
    SetColumns(u8),
    SetRows(u8),
}

fuzz_target!(|ops: Vec<Op>| {
    if ops.len() > 256 {
        return;
    }
    let mut doc: GridDocument<u16> = GridDocument::new(2, 1);

    for (n, op) in ops.into_iter().enumerate() {
        let ids: Vec<_> = doc.items().iter().map(|item| item.id.clone()).collect();
        let pick = |raw: u8| (!ids.is_empty()).then(|| ids[usize::from(raw) % ids.len()].clone());
        match op {
            Op::Insert => {
                doc.insert(n as u16).expect("insert on valid grid");
            }
            Op::Remove(raw) => {
                if let Some(id) = pick(raw) {
                    doc.remove(&id);
                }
            }
            Op::MoveTo { item, row, col } => {
                if let Some(id) = pick(item) {
                    let target = DropTarget::cell(u16::from(row % 8), u16::from(col % 8));
                    doc.move_item(&id, target).expect("known item");
                }
            }
            Op::MoveBottom(raw) => {
                if let Some(id) = pick(raw) {
                    doc.move_item(&id, DropTarget::BottomEdge).expect("known item");
                }
            }
            Op::MoveRight(raw) => {
                if let Some(id) = pick(raw) {
                    doc.move_item(&id, DropTarget::RightEdge).expect("known item");
                }
            }
            Op::Resize { item, row_axis, line, delta } => {
                if let Some(id) = pick(item) {
                    let axis = if row_axis { Axis::Row } else { Axis::Column };
                    let index = u16::from(line) % (doc.tracks(axis) + 1);
                    doc.resize_line(ResizeLine::new(axis, index), &id, i32::from(delta % 5))
                        .expect("line in range");
                }
            }
            Op::SetColumns(count) => {
                let _ = doc.set_columns(u16::from(count % 6));
            }
            Op::SetRows(count) => {
                doc.set_rows(u16::from(count % 6));
            }
        }

        // Post-condition that must always hold.
        doc.validate().expect("layout invariants hold after every operation");
    }
});
