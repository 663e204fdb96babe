use oneof::{OneOf as _, one_of};

#[derive(Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Number(i32);

#[derive(Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Text(String);

#[one_of(serde, eq)]
#[derive(Debug)]
pub struct MySet {
    number: Option<Number>,
    text: Option<Text>,
}

#[one_of(serde)]
#[derive(Debug)]
pub struct Wrapper<T> {
    single: Option<T>,
    r#many: Option<Vec<T>>,
}

#[test]
fn serde_roundtrip() -> anyhow::Result<()> {
    let value: MySet = Text("asdf".to_string()).into();

    let serialized = serde_json::to_string(&value)?;
    assert_eq!(serialized, r#"{"text":"asdf"}"#);
    let deserialized: MySet = serde_json::from_str(&serialized)?;
    assert_eq!(deserialized, value);

    let text: Text = deserialized.try_into().unwrap_or_else(|_| unreachable!());
    assert_eq!(text.0, "asdf");
    Ok(())
}

#[test]
fn vacant_is_an_empty_map() -> anyhow::Result<()> {
    let vacant = MySet::new(None, None);
    assert_eq!(serde_json::to_string(&vacant)?, "{}");

    let deserialized: MySet = serde_json::from_str("{}")?;
    assert!(deserialized.is_vacant());
    Ok(())
}

#[test]
fn only_the_first_occupied_slot_is_written() -> anyhow::Result<()> {
    let crowded = MySet::new(Some(Number(1)), Some(Text("t".to_string())));
    assert_eq!(serde_json::to_string(&crowded)?, r#"{"number":1}"#);
    Ok(())
}

#[test]
fn malformed_input_is_rejected() {
    let error = serde_json::from_str::<MySet>(r#"{"number":1,"text":"t"}"#).unwrap_err();
    assert!(error.to_string().contains("invalid length 2"), "{error}");

    let error = serde_json::from_str::<MySet>(r#"{"other":1}"#).unwrap_err();
    assert!(error.to_string().contains("unknown variant `other`"), "{error}");

    let error = serde_json::from_str::<MySet>("[1]").unwrap_err();
    assert!(error.to_string().contains("a map with at most one entry"), "{error}");

    assert!(serde_json::from_str::<MySet>(r#"{"number":"not a number"}"#).is_err());
}

#[test]
fn generic_payloads() -> anyhow::Result<()> {
    let many: Wrapper<u8> = serde_json::from_str(r#"{"many":[1,2]}"#)?;
    assert_eq!(many.as_many(), Some(&vec![1, 2]));
    assert_eq!(serde_json::to_string(&many)?, r#"{"many":[1,2]}"#);

    let single: Wrapper<String> = serde_json::from_str(r#"{"single":"s"}"#)?;
    assert_eq!(single.as_single().map(String::as_str), Some("s"));
    Ok(())
}
