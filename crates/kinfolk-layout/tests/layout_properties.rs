//! Property suite for the generation and placement passes.
//!
//! Random trees are generated as parent-index vectors (`parents[i] < i + 1`),
//! which always describe a valid rooted tree with ordered children.

use kinfolk_layout::{LayoutMetrics, PersonId, TreeShape, layout, measure};
use proptest::prelude::*;
use std::collections::HashMap;

struct Tree {
    root: PersonId,
    children: HashMap<PersonId, Vec<PersonId>>,
}

impl Tree {
    fn from_parents(parents: &[usize]) -> Self {
        let ids: Vec<PersonId> = (0..=parents.len())
            .map(|i| PersonId::from(format!("p{i}")))
            .collect();
        let mut children: HashMap<PersonId, Vec<PersonId>> =
            ids.iter().map(|id| (id.clone(), Vec::new())).collect();
        for (i, &parent) in parents.iter().enumerate() {
            children
                .get_mut(&ids[parent])
                .expect("parent exists")
                .push(ids[i + 1].clone());
        }
        Self {
            root: ids[0].clone(),
            children,
        }
    }
}

impl TreeShape for Tree {
    fn root(&self) -> &PersonId {
        &self.root
    }

    fn children(&self, id: &PersonId) -> Option<&[PersonId]> {
        self.children.get(id).map(Vec::as_slice)
    }
}

fn parents_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..60).prop_map(|picks| {
        picks
            .iter()
            .enumerate()
            .map(|(i, pick)| pick.index(i + 1))
            .collect()
    })
}

proptest! {
    #[test]
    fn subtree_width_is_leaf_count(parents in parents_strategy()) {
        let tree = Tree::from_parents(&parents);
        let generations = measure(&tree);
        prop_assert!(generations.issues().is_empty());
        prop_assert_eq!(generations.len(), parents.len() + 1);

        for (id, entry) in generations.iter() {
            let kids = tree.children(id).unwrap();
            if kids.is_empty() {
                prop_assert_eq!(entry.subtree_width, 1);
            } else {
                let sum: usize = kids
                    .iter()
                    .map(|c| generations.subtree_width(c).unwrap())
                    .sum();
                prop_assert_eq!(entry.subtree_width, sum);
            }
        }
    }

    #[test]
    fn child_layer_is_parent_layer_plus_one(parents in parents_strategy()) {
        let tree = Tree::from_parents(&parents);
        let generations = measure(&tree);
        prop_assert_eq!(generations.layer(&tree.root), Some(0));
        for (id, entry) in generations.iter() {
            for child in tree.children(id).unwrap() {
                prop_assert_eq!(generations.layer(child), Some(entry.layer + 1));
            }
        }
    }

    #[test]
    fn bands_on_a_layer_never_overlap(parents in parents_strategy()) {
        let tree = Tree::from_parents(&parents);
        let placed = layout(&tree, &LayoutMetrics::default());
        for layer in 0..placed.layer_count() {
            let row: Vec<_> = placed.layer(layer).collect();
            for pair in row.windows(2) {
                prop_assert!(
                    pair[0].band_right() <= pair[1].band_left,
                    "bands overlap on layer {}: {:?} / {:?}",
                    layer,
                    pair[0],
                    pair[1]
                );
                prop_assert!(!pair[0].rect.overlaps_x(&pair[1].rect));
            }
        }
    }

    #[test]
    fn children_stay_inside_parent_band(parents in parents_strategy()) {
        let tree = Tree::from_parents(&parents);
        let placed = layout(&tree, &LayoutMetrics::default());
        for p in placed.iter() {
            prop_assert!(p.rect.x >= p.band_left - 1e-9);
            prop_assert!(p.rect.right() <= p.band_right() + 1e-9);
            if let Some(parent) = &p.parent {
                let parent = placed.placement(parent).unwrap();
                prop_assert!(p.band_left >= parent.band_left - 1e-9);
                prop_assert!(p.band_right() <= parent.band_right() + 1e-9);
            }
        }
    }

    #[test]
    fn layout_is_deterministic(parents in parents_strategy()) {
        let tree = Tree::from_parents(&parents);
        let metrics = LayoutMetrics::default();
        let a = layout(&tree, &metrics);
        let b = layout(&tree, &metrics);
        let left: Vec<_> = a.iter().collect();
        let right: Vec<_> = b.iter().collect();
        prop_assert_eq!(left, right);
    }
}

#[test]
fn three_siblings_with_a_wide_middle() {
    // root -> [a, b, c]; b -> [b1, b2, b3]
    let tree = Tree::from_parents(&[0, 0, 0, 2, 2, 2]);
    let placed = layout(&tree, &LayoutMetrics::default());
    let x = |name: &str| placed.rect(&PersonId::from(name)).unwrap().x;

    assert_eq!(x("p0"), 480.0);
    assert_eq!(x("p1"), 0.0);
    assert_eq!(x("p2"), 480.0);
    assert_eq!(x("p3"), 960.0);
    assert_eq!(x("p4"), 240.0);
    assert_eq!(x("p5"), 480.0);
    assert_eq!(x("p6"), 720.0);

    let b1 = placed.placement(&PersonId::from("p4")).unwrap();
    assert_eq!(b1.rect.y, 640.0);
    assert_eq!(placed.bounds().width, 1160.0);
    assert_eq!(placed.bounds().height, 920.0);
}

#[test]
fn custom_metrics_scale_positions() {
    let tree = Tree::from_parents(&[0, 0]);
    let metrics = LayoutMetrics::default()
        .with_node_size(100.0, 50.0)
        .with_spacing(10.0, 20.0);
    let placed = layout(&tree, &metrics);
    let root = placed.placement(&PersonId::from("p0")).unwrap();
    assert_eq!(root.band_width, 210.0);
    assert_eq!(root.rect.x, 55.0);
    let second = placed.placement(&PersonId::from("p2")).unwrap();
    assert_eq!(second.rect.x, 110.0);
    assert_eq!(second.rect.y, 70.0);
}
