//! Recursive value merging.
//!
//! Merge semantics:
//! - Maps: merged key by key, recursively
//! - Lists: replaced whole (no element-wise merge)
//! - Scalars and mismatched shapes: overlay wins

use crate::value::{Value, ValueMap};

/// Merge `overlay` on top of `base`.
pub fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Map(base_map), Value::Map(overlay_map)) => {
            Value::Map(merge_maps(base_map, overlay_map))
        }
        (_, overlay) => overlay,
    }
}

/// Merge two maps: keys only in `base` survive, keys in `overlay` win or recurse.
pub fn merge_maps(mut base: ValueMap, overlay: ValueMap) -> ValueMap {
    for (key, overlay_value) in overlay {
        let merged = match base.remove(&key) {
            Some(base_value) => merge(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged);
    }
    base
}

/// Fold a chain of maps ordered farthest ancestor first, self last.
pub fn merge_chain<'a, I>(chain: I) -> ValueMap
where
    I: IntoIterator<Item = &'a ValueMap>,
{
    chain
        .into_iter()
        .fold(ValueMap::new(), |acc, layer| merge_maps(acc, layer.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_map;

    #[test]
    fn test_scalar_override() {
        assert_eq!(merge(Value::Int(100), Value::Int(200)), Value::Int(200));
    }

    #[test]
    fn test_mismatched_shapes_overlay_wins() {
        let base = Value::Map(value_map! { "a" => 1 });
        assert_eq!(merge(base, Value::from("flat")), Value::from("flat"));
        assert_eq!(
            merge(Value::from("flat"), Value::Map(value_map! { "a" => 1 })),
            Value::Map(value_map! { "a" => 1 })
        );
    }

    #[test]
    fn test_list_replaced() {
        let merged = merge(Value::from(vec!["A", "B", "C"]), Value::from(vec!["X"]));
        assert_eq!(merged, Value::from(vec!["X"]));
    }

    #[test]
    fn test_nested_map_merge() {
        let base = value_map! {
            "base" => "/gadgets/foo",
            "user" => "peter",
            "map" => value_map! { "latitude" => 42, "longitude" => -8 },
        };
        let overlay = value_map! {
            "user" => "anne",
            "colour" => "green",
            "map" => value_map! { "longitude" => 130 },
        };

        assert_eq!(
            merge_maps(base, overlay),
            value_map! {
                "base" => "/gadgets/foo",
                "user" => "anne",
                "colour" => "green",
                "map" => value_map! { "latitude" => 42, "longitude" => 130 },
            }
        );
    }

    #[test]
    fn test_chain_closer_layers_win() {
        let root = value_map! { "a" => 1, "b" => 1, "c" => 1 };
        let middle = value_map! { "b" => 2, "c" => 2 };
        let leaf = value_map! { "c" => 3 };

        assert_eq!(
            merge_chain([&root, &middle, &leaf]),
            value_map! { "a" => 1, "b" => 2, "c" => 3 }
        );
    }

    #[test]
    fn test_chain_is_associative() {
        let a = value_map! { "m" => value_map! { "x" => 1, "y" => 1 } };
        let b = value_map! { "m" => value_map! { "y" => 2 }, "k" => "b" };
        let c = value_map! { "m" => value_map! { "z" => 3 }, "k" => "c" };

        let left = merge_maps(merge_maps(a.clone(), b.clone()), c.clone());
        let right = merge_maps(a, merge_maps(b, c));
        assert_eq!(left, right);
    }

    #[test]
    fn test_empty_chain() {
        assert!(merge_chain(std::iter::empty::<&ValueMap>()).is_empty());
    }
}
