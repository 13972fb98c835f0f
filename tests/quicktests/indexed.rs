use indexed_bst::{DuplicatePlacement, Error, Identifier, IndexedTree, RemovalStrategy, TreeConfig};
use quickcheck_macros::quickcheck;

use std::collections::HashMap;

use crate::Op;

fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

/// Applies a set of operations to a tree and a hashmap keyed by identifier.
/// This way we can ensure that after a random smattering of inserts,
/// removes, and updates the tree holds exactly what the map holds.
///
/// Removal by identifier descent is allowed to miss, but a miss must leave
/// the tree untouched.
fn do_ops<V>(ops: &[Op<V>], tree: &mut IndexedTree<V>, map: &mut HashMap<Identifier, V>) -> bool
where
    V: Ord + Clone + std::fmt::Debug,
{
    let mut ids = Vec::new();
    for op in ops {
        match op {
            Op::Insert(v) => {
                let id = tree.insert(v.clone()).unwrap();
                map.insert(id, v.clone());
                ids.push(id);
            }
            Op::Remove(i) => {
                if ids.is_empty() {
                    continue;
                }
                let id = ids[i % ids.len()];
                let len_before = tree.len();
                match tree.remove(id) {
                    Ok(v) => {
                        if map.remove(&id) != Some(v) {
                            return false;
                        }
                    }
                    Err(Error::NodeNotFound(_)) => {
                        if tree.len() != len_before || tree.contains(id) != map.contains_key(&id) {
                            return false;
                        }
                    }
                    Err(_) => return false,
                }
            }
            Op::Update(i, v) => {
                if ids.is_empty() {
                    continue;
                }
                let id = ids[i % ids.len()];
                let expected = map
                    .get_mut(&id)
                    .map(|old| std::mem::replace(old, v.clone()));
                if tree.update(id, v.clone()).ok() != expected {
                    return false;
                }
            }
            Op::Iter => {
                let seen: HashMap<_, _> = tree.iter().map(|(id, v)| (id, v.clone())).collect();
                if seen != *map || !tree.is_consistent() {
                    return false;
                }
            }
        }
    }

    tree.is_consistent()
}

fn agrees_with_map(tree: &IndexedTree<i8>, map: &HashMap<Identifier, i8>) -> bool {
    tree.len() == map.len() && map.iter().all(|(id, v)| tree.get(*id) == Some(v))
}

#[quickcheck]
fn fuzz_index_lookup_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree =
        IndexedTree::with_config(TreeConfig::default().with_removal(RemovalStrategy::IndexLookup));
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map) && agrees_with_map(&tree, &map)
}

#[quickcheck]
fn fuzz_identifier_descent_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = IndexedTree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map) && agrees_with_map(&tree, &map)
}

#[quickcheck]
fn index_lookup_removes_everything(xs: Vec<i8>) -> bool {
    let mut tree =
        IndexedTree::with_config(TreeConfig::default().with_removal(RemovalStrategy::IndexLookup));
    let ids: Vec<_> = xs.iter().map(|x| tree.insert(*x).unwrap()).collect();

    ids.iter().all(|id| tree.remove(*id).is_ok()) && tree.is_empty() && tree.is_consistent()
}

#[quickcheck]
fn removals_keep_value_order(xs: Vec<i8>, removes: Vec<usize>) -> bool {
    let mut tree = IndexedTree::new();
    let ids: Vec<_> = xs.iter().map(|x| tree.insert(*x).unwrap()).collect();
    if !ids.is_empty() {
        for i in &removes {
            let _ = tree.remove(ids[i % ids.len()]);
        }
    }

    let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
    values.windows(2).all(|w| w[0] <= w[1]) && tree.is_consistent()
}

#[quickcheck]
fn find_by_value_finds_every_copy(xs: Vec<i8>) -> bool {
    let mut tree = IndexedTree::new();
    let inserted: Vec<_> = xs.iter().map(|x| (tree.insert(*x).unwrap(), *x)).collect();

    xs.iter().all(|x| {
        let found = tree.find_by_value(x);
        let expected = inserted.iter().filter(|(_, v)| v == x).count();
        found.len() == expected
            && found
                .iter()
                .all(|(id, v)| *v == x && inserted.contains(&(*id, *x)))
    })
}

/// Ids of equal values, in the order `find_by_value` reports them, checked
/// against the order they were inserted in.
fn duplicate_order(xs: &[u8], duplicates: DuplicatePlacement) -> bool {
    let mut tree = IndexedTree::with_config(TreeConfig::default().with_duplicates(duplicates));
    let inserted: Vec<_> = xs.iter().map(|x| (tree.insert(*x).unwrap(), *x)).collect();

    xs.iter().all(|x| {
        let mut in_insertion_order: Vec<_> = inserted
            .iter()
            .filter(|(_, v)| v == x)
            .map(|(id, _)| *id)
            .collect();
        if duplicates == DuplicatePlacement::Left {
            in_insertion_order.reverse();
        }
        let found: Vec<_> = tree.find_by_value(x).into_iter().map(|(id, _)| id).collect();
        found == in_insertion_order
    })
}

#[quickcheck]
fn duplicates_left_are_newest_first(xs: Vec<u8>) -> bool {
    duplicate_order(&xs, DuplicatePlacement::Left)
}

#[quickcheck]
fn duplicates_right_are_oldest_first(xs: Vec<u8>) -> bool {
    duplicate_order(&xs, DuplicatePlacement::Right)
}

#[quickcheck]
fn updated_value_is_found(xs: Vec<i8>, pick: usize, new_value: i8) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree = IndexedTree::new();
    let ids: Vec<_> = xs.iter().map(|x| tree.insert(*x).unwrap()).collect();
    let id = ids[pick % ids.len()];

    tree.update(id, new_value).is_ok()
        && tree
            .find_by_value(&new_value)
            .iter()
            .any(|(found, _)| *found == id)
}
