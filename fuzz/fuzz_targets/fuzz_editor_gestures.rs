#![no_main]

use arbitrary::Arbitrary;
use kinfolk::{Editor, Person, PersonId, Point};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    AddChild { parent: u8 },
    Select { pick: u8 },
    Down { x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up,
    Cancel,
    Rotate { parent: u8, by: u8 },
    Title(String),
    ZoomIn,
    ZoomOut,
}

fn pick(editor: &Editor, n: u8) -> PersonId {
    let ids: Vec<PersonId> = editor.family().members().map(|p| p.id.clone()).collect();
    ids[n as usize % ids.len()].clone()
}

fuzz_target!(|ops: Vec<Op>| {
    let mut editor = Editor::new();
    for op in ops.into_iter().take(64) {
        match op {
            Op::AddChild { parent } => {
                let parent = pick(&editor, parent);
                editor
                    .add_child_done(&parent, Person::new())
                    .expect("adding under a member succeeds");
            }
            Op::Select { pick: n } => {
                let id = pick(&editor, n);
                assert!(editor.select(&id));
            }
            Op::Down { x, y } => {
                editor.pointer_down(Point::new(f64::from(x) * 4.0, f64::from(y) * 4.0));
            }
            Op::Move { x, y } => {
                editor.pointer_move(Point::new(f64::from(x) * 4.0, f64::from(y) * 4.0));
            }
            Op::Up => {
                editor.pointer_up().expect("committed drags are permutations");
            }
            Op::Cancel => {
                editor.cancel_drag();
            }
            Op::Rotate { parent, by } => {
                let parent = pick(&editor, parent);
                let mut order = editor
                    .family()
                    .member(&parent)
                    .map(|p| p.children.clone())
                    .unwrap_or_default();
                if !order.is_empty() {
                    let by = by as usize % order.len();
                    order.rotate_left(by);
                    editor
                        .reorder_children(&parent, order)
                        .expect("rotation is a permutation");
                }
            }
            Op::Title(title) => editor.set_title(title),
            Op::ZoomIn => {
                editor.zoom_in();
            }
            Op::ZoomOut => {
                editor.zoom_out();
            }
        }

        // Post-conditions that must always hold:
        assert!(editor.family().invariant_report().is_clean(), "store invariants broken");
        assert_eq!(editor.scene().len(), editor.family().len(), "scene out of sync");
        assert!(editor.viewport().zoom() >= kinfolk::scene::MIN_ZOOM);
        let layout = editor.layout();
        for placement in layout.iter() {
            for sibling in layout.layer(placement.layer) {
                if sibling.id != placement.id {
                    assert!(
                        placement.band_right() <= sibling.band_left
                            || sibling.band_right() <= placement.band_left,
                        "bands overlap on layer {}",
                        placement.layer
                    );
                }
            }
        }
    }
});
