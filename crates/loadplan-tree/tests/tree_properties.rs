//! Structural properties of artifact trees under arbitrary edits.

use loadplan_tree::{ArtifactTree, ElementKind, TestElement, TreeNode, TreePath};
use proptest::prelude::*;

const KINDS: [ElementKind; 4] = [
    ElementKind::ThreadGroup,
    ElementKind::SoapSampler,
    ElementKind::HttpSampler,
    ElementKind::ResponseAssertion,
];

fn arb_node() -> impl Strategy<Value = TreeNode> {
    let leaf = (0..KINDS.len(), "[a-z]{1,6}")
        .prop_map(|(k, name)| TreeNode::new(TestElement::new(KINDS[k]).with_name(name)));

    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            0..KINDS.len(),
            "[a-z]{1,6}",
            proptest::collection::vec(inner, 0..4),
        )
            .prop_map(|(k, name, children)| {
                let mut node = TreeNode::new(TestElement::new(KINDS[k]).with_name(name));
                for child in children {
                    node.push_child(child);
                }
                node
            })
    })
}

proptest! {
    #[test]
    fn traversal_visits_every_node_once(root in arb_node()) {
        let tree = ArtifactTree::from(root);
        prop_assert_eq!(tree.depth_first().count(), tree.node_count());
    }

    #[test]
    fn every_traversed_path_resolves(root in arb_node()) {
        let tree = ArtifactTree::from(root);
        for (path, node) in tree.depth_first() {
            prop_assert_eq!(tree.get(&path), Some(node));
        }
    }

    #[test]
    fn removing_a_subtree_removes_exactly_its_nodes(root in arb_node(), pick in any::<prop::sample::Index>()) {
        let mut tree = ArtifactTree::from(root);
        let paths: Vec<TreePath> = tree.depth_first().map(|(p, _)| p).collect();
        let target = pick.get(&paths).clone();
        let before = tree.node_count();

        let removed = tree.remove(&target).expect("path taken from traversal");

        prop_assert_eq!(tree.node_count() + removed.node_count(), before);
        prop_assert_eq!(tree.is_empty(), target.is_root());
    }

    #[test]
    fn clone_has_equal_digest(root in arb_node()) {
        let tree = ArtifactTree::from(root);
        prop_assert_eq!(tree.clone().digest(), tree.digest());
    }
}
