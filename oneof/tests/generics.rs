use std::collections::HashSet;

use oneof::{OneOf, one_of};

#[one_of(eq)]
#[derive(Debug)]
pub struct Either<L, R> {
    left: Option<L>,
    right: Option<R>,
}

#[one_of]
#[derive(Debug)]
pub struct Borrowed<'a, T>
where
    T: Clone,
{
    text: Option<&'a str>,
    items: Option<Vec<T>>,
}

#[one_of(no_hash)]
pub struct Tree<T> {
    leaf: Option<T>,
    node: Option<Box<(Tree<T>, Tree<T>)>>,
}

impl<T: Copy + std::ops::Add<Output = T>> Tree<T> {
    fn sum(&self) -> Option<T> {
        self.map(
            |leaf| Some(*leaf),
            |node| Some(node.0.sum()? + node.1.sum()?),
        )
        .ok()
        .flatten()
    }
}

#[test]
fn dispatch_with_type_parameters() {
    let left = Either::<i32, &str>::from_left(-1);
    let right = Either::<i32, &str>::from_right("r");

    let describe = |either: &Either<i32, &str>| {
        either
            .map(|l| format!("left {l}"), |r| format!("right {r}"))
            .unwrap()
    };
    assert_eq!(describe(&left), "left -1");
    assert_eq!(describe(&right), "right r");
}

#[test]
fn equality_is_bounded_by_the_payloads() {
    let mut seen = HashSet::new();
    assert!(seen.insert(Either::<u8, char>::from_left(1)));
    assert!(!seen.insert(Either::<u8, char>::from_left(1)));
    assert!(seen.insert(Either::<u8, char>::from_right('a')));
    assert_eq!(seen.len(), 2);
}

#[test]
fn lifetimes_and_where_clauses_are_kept() {
    let owned = String::from("borrowed text");
    let borrowed: Borrowed<'_, u8> = owned.as_str().into();
    assert_eq!(borrowed.as_text(), Some(&"borrowed text"));

    let items: Borrowed<'_, u8> = vec![1, 2].into();
    let items: Vec<u8> = items.try_into().unwrap();
    assert_eq!(items, [1, 2]);

    assert_eq!(<Borrowed<'_, u8> as OneOf>::PAYLOAD_TYPES, ["&'a str", "Vec<T>"]);
}

#[test]
fn recursive_generic_payloads() {
    let tree = Tree::from_node(Box::new((
        Tree::from_leaf(2),
        Tree::from_node(Box::new((Tree::from_leaf(3), Tree::from_leaf(4)))),
    )));
    assert_eq!(tree.sum(), Some(9));

    let broken: Tree<i32> = Tree::new(None, None);
    assert_eq!(broken.sum(), None);
    assert!(Tree::from_leaf(1) == Tree::from_leaf(1));
}
