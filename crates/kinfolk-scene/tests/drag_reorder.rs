//! End-to-end drag gestures against a live family and scene.
//!
//! Fixture: root with children A, B, C; B has three leaf children. With the
//! default metrics the sibling cards sit at x = 0, 480, 960 (width 200).

use kinfolk_core::{Person, PersonId, Point};
use kinfolk_scene::{DragState, ReorderController, Scene, Visual};
use kinfolk_store::Family;
use proptest::prelude::*;

struct Fixture {
    family: Family,
    scene: Scene,
    a: PersonId,
    b: PersonId,
    c: PersonId,
}

impl Fixture {
    fn new() -> Self {
        let mut family = Family::new();
        let root = family.root_id().clone();
        fn add(family: &mut Family, parent: &PersonId, name: &str) -> PersonId {
            let person = Person::new().with_name(name);
            let id = person.id.clone();
            family.add_child(parent, person).unwrap();
            id
        }
        let a = add(&mut family, &root, "A");
        let b = add(&mut family, &root, "B");
        let c = add(&mut family, &root, "C");
        for name in ["B1", "B2", "B3"] {
            add(&mut family, &b, name);
        }
        let mut scene = Scene::default();
        family.dispatch(&mut [&mut scene]);
        family.mark_saved();
        Self {
            family,
            scene,
            a,
            b,
            c,
        }
    }

    fn grab(&self, controller: &mut ReorderController, id: &PersonId) {
        let rect = self.scene.node(id).unwrap().rect;
        assert!(controller.begin(&self.scene, id, Point::new(rect.x + 10.0, rect.y + 10.0)));
    }

    fn drag_to(&mut self, controller: &mut ReorderController, x: f64) -> Option<usize> {
        controller.move_to(&mut self.scene, &self.family, Point::new(x, 400.0))
    }

    fn release(&mut self, controller: &mut ReorderController) -> Option<Vec<PersonId>> {
        let committed = controller.end(&mut self.scene, &mut self.family).unwrap();
        self.family.dispatch(&mut [&mut self.scene]);
        committed
    }

    fn root_children(&self) -> Vec<PersonId> {
        self.family.siblings(&self.a).to_vec()
    }

    fn xs(&self, ids: &[&PersonId]) -> Vec<f64> {
        ids.iter()
            .map(|id| self.scene.node(id).unwrap().rect.x)
            .collect()
    }
}

#[test]
fn fixture_positions() {
    let fx = Fixture::new();
    assert_eq!(fx.xs(&[&fx.a, &fx.b, &fx.c]), vec![0.0, 480.0, 960.0]);
    assert_eq!(fx.scene.node(fx.family.root_id()).unwrap().rect.x, 480.0);
}

#[test]
fn drop_before_first_sibling_moves_to_front() {
    let mut fx = Fixture::new();
    let mut controller = ReorderController::new();
    let c = fx.c.clone();
    fx.grab(&mut controller, &c);

    assert_eq!(fx.drag_to(&mut controller, -50.0), Some(0));
    assert!(fx.scene.ghost().visible);
    let gap = fx.scene.gap_indicator();
    assert!(gap.visible);
    assert_eq!(gap.rect.x, -15.0);

    let committed = fx.release(&mut controller).unwrap();
    assert_eq!(committed, vec![fx.c.clone(), fx.a.clone(), fx.b.clone()]);
    assert_eq!(fx.root_children(), committed);
    assert!(fx.family.is_dirty());
    assert!(!fx.scene.ghost().visible);
    assert!(!fx.scene.gap_indicator().visible);
    assert_eq!(fx.scene.node(&fx.c).unwrap().rect.x, 0.0);
    assert_eq!(fx.family.member(&fx.c).unwrap().index_as_child, 0);
}

#[test]
fn hovering_a_sibling_proposes_nothing() {
    let mut fx = Fixture::new();
    let mut controller = ReorderController::new();
    let c = fx.c.clone();
    fx.grab(&mut controller, &c);

    assert_eq!(fx.drag_to(&mut controller, 100.0), None);
    assert!(!fx.scene.gap_indicator().visible);
    assert_eq!(fx.release(&mut controller), None);
    assert!(!fx.family.is_dirty());
}

#[test]
fn gap_between_first_and_second() {
    let mut fx = Fixture::new();
    let mut controller = ReorderController::new();
    let c = fx.c.clone();
    fx.grab(&mut controller, &c);

    for x in [200.0, 300.0, 479.0] {
        assert_eq!(fx.drag_to(&mut controller, x), Some(1), "x = {x}");
    }
    let committed = fx.release(&mut controller).unwrap();
    assert_eq!(committed, vec![fx.a.clone(), fx.c.clone(), fx.b.clone()]);
}

#[test]
fn dragging_right_closes_own_slot() {
    let mut fx = Fixture::new();
    let mut controller = ReorderController::new();
    let a = fx.a.clone();
    fx.grab(&mut controller, &a);

    assert_eq!(fx.drag_to(&mut controller, 700.0), Some(1));
    let committed = fx.release(&mut controller).unwrap();
    assert_eq!(committed, vec![fx.b.clone(), fx.a.clone(), fx.c.clone()]);
}

#[test]
fn dropping_next_to_itself_is_a_no_op() {
    let mut fx = Fixture::new();
    let mut controller = ReorderController::new();
    let a = fx.a.clone();
    fx.grab(&mut controller, &a);

    assert_eq!(fx.drag_to(&mut controller, 300.0), None);
    // The bar still shows where the pointer is.
    assert!(fx.scene.gap_indicator().visible);
    assert_eq!(fx.release(&mut controller), None);
}

#[test]
fn cancel_does_not_commit() {
    let mut fx = Fixture::new();
    let mut controller = ReorderController::new();
    let c = fx.c.clone();
    fx.grab(&mut controller, &c);
    assert_eq!(fx.drag_to(&mut controller, -50.0), Some(0));

    assert!(controller.cancel(&mut fx.scene));
    assert_eq!(controller.state(), &DragState::Idle);
    assert_eq!(fx.root_children(), vec![fx.a.clone(), fx.b.clone(), fx.c.clone()]);
    assert!(!fx.family.is_dirty());
    assert!(
        !fx.scene
            .visuals()
            .iter()
            .any(|v| matches!(v, Visual::Ghost(_) | Visual::GapIndicator(_)))
    );
}

#[test]
fn second_begin_is_ignored_while_dragging() {
    let fx = Fixture::new();
    let mut controller = ReorderController::new();
    fx.grab(&mut controller, &fx.a);
    assert!(!controller.begin(&fx.scene, &fx.b, Point::new(500.0, 330.0)));
    match controller.state() {
        DragState::Dragging { grabbed, .. } => assert_eq!(grabbed, &fx.a),
        DragState::Idle => panic!("expected an active drag"),
    }
}

#[test]
fn only_child_cannot_be_reordered() {
    let mut family = Family::new();
    let root = family.root_id().clone();
    let only = Person::new().with_name("Only");
    let id = only.id.clone();
    family.add_child(&root, only).unwrap();
    let mut scene = Scene::default();
    family.dispatch(&mut [&mut scene]);

    let mut controller = ReorderController::new();
    assert!(controller.begin(&scene, &id, Point::new(485.0, 330.0)));
    assert_eq!(
        controller.move_to(&mut scene, &family, Point::new(-100.0, 330.0)),
        None
    );
    assert!(!scene.gap_indicator().visible);
    assert!(scene.ghost().visible);
}

#[test]
fn reorder_to_same_order_keeps_positions() {
    let mut fx = Fixture::new();
    let before = fx.xs(&[&fx.a, &fx.b, &fx.c]);
    let order = fx.root_children();
    let root = fx.family.root_id().clone();
    fx.family.reorder_children(&root, order).unwrap();
    fx.family.dispatch(&mut [&mut fx.scene]);
    assert_eq!(fx.xs(&[&fx.a, &fx.b, &fx.c]), before);
}

proptest! {
    #[test]
    fn any_release_yields_a_permutation(pick in 0usize..3, x in -300.0f64..1500.0) {
        let mut fx = Fixture::new();
        let ids = [fx.a.clone(), fx.b.clone(), fx.c.clone()];
        let grabbed = ids[pick].clone();
        let mut controller = ReorderController::new();
        fx.grab(&mut controller, &grabbed);
        let proposed = fx.drag_to(&mut controller, x);
        let committed = fx.release(&mut controller);

        prop_assert_eq!(committed.is_some(), proposed.is_some());
        let mut now = fx.root_children();
        if let Some(index) = proposed {
            prop_assert_eq!(&now[index], &grabbed);
        }
        now.sort();
        let mut original = ids.to_vec();
        original.sort();
        prop_assert_eq!(now, original);
        prop_assert!(!controller.is_dragging());
    }
}
