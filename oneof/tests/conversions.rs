use std::marker::PhantomData;

use oneof::{OneOf as _, one_of};

// Method resolution prefers `ViaFrom` when `O: From<T>` holds and falls back otherwise.
struct Witness<T>(PhantomData<T>);

trait ViaFrom {
    fn has_from(&self) -> bool {
        true
    }
}

impl<T, O> ViaFrom for &Witness<(T, O)> where O: From<T> {}

trait Fallback {
    fn has_from(&self) -> bool {
        false
    }
}

impl<T> Fallback for Witness<T> {}

macro_rules! has_from {
    ($from:ty => $owner:ty) => {
        (&&Witness::<($from, $owner)>(PhantomData)).has_from()
    };
}

#[derive(Debug, PartialEq, Hash)]
pub struct Circle {
    radius: u32,
}

#[derive(Debug, PartialEq, Hash)]
pub struct Square {
    side: u32,
}

#[one_of]
#[derive(Debug)]
pub struct Shape {
    circle: Option<Circle>,
    square: Option<Square>,
}

#[one_of]
#[derive(Debug)]
pub struct Names {
    first_string: Option<String>,
    number: Option<u32>,
    second_string: Option<String>,
}

#[one_of]
#[derive(Debug)]
pub struct Labels {
    short: Option<String>,
    qualified: Option<std::string::String>,
}

#[one_of]
pub struct Either<L, R> {
    left: Option<L>,
    right: Option<R>,
}

#[one_of]
#[derive(Debug)]
pub struct Batch<T> {
    many: Option<Vec<T>>,
    label: Option<String>,
}

#[one_of]
#[derive(Debug)]
pub struct Expr {
    literal: Option<i64>,
    negated: Option<Box<Expr>>,
}

#[test]
fn distinct_payloads_convert_both_ways() {
    let shape: Shape = Circle { radius: 2 }.into();
    assert!(shape.is_circle());

    let shape = Square::try_from(shape).unwrap_err();
    let circle = Circle::try_from(shape).unwrap();
    assert_eq!(circle, Circle { radius: 2 });

    let shape = Shape::from(Square { side: 3 });
    assert_eq!(Square::try_from(shape).unwrap(), Square { side: 3 });
}

#[test]
fn try_from_only_takes_the_first_occupied_slot() {
    let shape = Shape::new(Some(Circle { radius: 1 }), Some(Square { side: 1 }));

    let shape = Square::try_from(shape).unwrap_err();
    assert!(shape.is_square());
    assert_eq!(Circle::try_from(shape).unwrap(), Circle { radius: 1 });

    let vacant = Shape::new(None, None);
    assert!(Circle::try_from(vacant).is_err());
}

#[test]
fn duplicate_payloads_have_no_conversions() {
    assert!(has_from!(Circle => Shape));
    assert!(!has_from!(String => Names));
    // A unique payload type is still left out once any type repeats
    assert!(!has_from!(u32 => Names));

    let names = Names::from_second_string("b".to_string());
    let text = names
        .map(|_| "first", |_| "number", |_| "second")
        .unwrap();
    assert_eq!(text, "second");
}

#[test]
fn differently_spelled_duplicates_have_no_conversions() {
    assert!(!has_from!(String => Labels));

    let labels = Labels::from_qualified("q".to_string());
    assert_eq!(labels.as_qualified().map(String::as_str), Some("q"));
    assert_eq!(labels.variant_name(), Some("Qualified"));
}

#[test]
fn overlapping_parameters_have_no_conversions() {
    assert!(!has_from!(u8 => Either<u8, String>));
    assert!(!has_from!(String => Either<u8, String>));

    let either = Either::<u8, String>::from_right("r".to_string());
    assert_eq!(either.as_right().map(String::as_str), Some("r"));
}

#[test]
fn covered_parameters_keep_conversions() {
    assert!(has_from!(Vec<u8> => Batch<u8>));
    assert!(has_from!(String => Batch<u8>));

    let batch: Batch<u8> = vec![1, 2, 3].into();
    assert_eq!(Vec::<u8>::try_from(batch).unwrap(), [1, 2, 3]);
}

#[test]
fn recursive_payloads_convert_into_the_owner() {
    let literal: Expr = 5i64.into();
    let negated: Expr = Box::new(literal).into();

    let value = negated
        .map(|literal| *literal, |inner| -inner.as_literal().copied().unwrap_or_default())
        .unwrap();
    assert_eq!(value, -5);
}
