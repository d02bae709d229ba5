//! Property-based tests for the project outline

use hfm_core::outline::{ItemId, ItemKind, OutlineModel, ProjectOutline};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    AddFolder(usize),
    AddModule(usize),
    Remove(usize),
    Rename(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        2 => (0usize..32).prop_map(Edit::AddFolder),
        3 => (0usize..32).prop_map(Edit::AddModule),
        1 => (0usize..32).prop_map(Edit::Remove),
        1 => (0usize..32).prop_map(Edit::Rename),
    ]
}

/// Every ID the outline currently knows, root first.
fn known_ids(outline: &ProjectOutline) -> Vec<ItemId> {
    std::iter::once(outline.root_id())
        .chain(outline.rows().into_iter().map(|row| row.id))
        .collect()
}

proptest! {
    /// The flattened rows always describe exactly the items below the root.
    #[test]
    fn rows_match_the_tree(edits in prop::collection::vec(edit_strategy(), 0..40)) {
        let mut outline = ProjectOutline::new("prop");
        let mut next = 0usize;
        for edit in &edits {
            let ids = known_ids(&outline);
            let pick = |n: usize| ids[n % ids.len()];
            let revision = outline.revision();
            let changed = match edit {
                Edit::AddFolder(n) => outline
                    .add_item(pick(*n), format!("dir{next}"), ItemKind::Folder, None)
                    .is_ok(),
                Edit::AddModule(n) => outline
                    .add_item(
                        pick(*n),
                        format!("M{next}.hs"),
                        ItemKind::Module,
                        Some(format!("M{next}.hs").into()),
                    )
                    .is_ok(),
                Edit::Remove(n) => {
                    let id = pick(*n);
                    let before = outline.len();
                    match outline.remove_item(id) {
                        Ok(removed) => {
                            prop_assert_eq!(outline.len(), before - removed.subtree_len());
                            prop_assert!(outline.resolve(id).is_none());
                            true
                        }
                        Err(_) => {
                            prop_assert_eq!(id, outline.root_id());
                            false
                        }
                    }
                }
                Edit::Rename(n) => outline.rename_item(pick(*n), format!("renamed{next}")).is_ok(),
            };
            next += 1;

            if changed {
                prop_assert!(outline.revision() > revision);
            } else {
                prop_assert_eq!(outline.revision(), revision);
            }
            let rows = outline.rows();
            prop_assert_eq!(rows.len(), outline.len());
            prop_assert_eq!(outline.is_empty(), rows.is_empty());
            for row in &rows {
                let item = outline.get(row.id).unwrap();
                prop_assert_eq!(&row.name, &item.name);
                prop_assert_eq!(row.has_children, !item.children.is_empty());
            }
        }
    }

    /// Items resolve to the selection descriptor the window consumes.
    #[test]
    fn resolved_items_carry_kind_and_path(count in 1usize..10) {
        let mut outline = ProjectOutline::new("prop");
        let root = outline.root_id();
        for n in 0..count {
            let path = format!("M{n}.hs");
            let id = outline
                .add_item(root, path.clone(), ItemKind::Module, Some(path.clone().into()))
                .unwrap();
            let item = outline.resolve(id).unwrap();
            prop_assert_eq!(item.kind, ItemKind::Module);
            prop_assert!(item.has_playground());
            prop_assert_eq!(item.file_path, Some(path.clone().into()));
            prop_assert_eq!(outline.lookup(&path), Some(id));
        }
    }
}
