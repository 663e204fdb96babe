//! Sum types spelled as structs of optional slots.
//!
//! A OneOf is a struct whose private `Option<T>` fields are its variants: at most one of
//! them is meant to be occupied at a time. The [macro@one_of] attribute fills in the rest:
//! * Factories - `from_<slot>(payload)` creates a value with exactly one occupied slot.
//! * Conversions - `From<Payload>` for the owner and `TryFrom<Owner>` for each payload,
//!   whenever every payload type is distinct.
//! * Dispatch - `map` and `visit` run the handler of the occupied slot, `map_or_else` and
//!   `visit_or_else` accept optional handlers and a fallback.
//! * Equality - `PartialEq` and `Hash` (and optionally `Eq`) that only consider the
//!   occupied slot.
//! * Introspection - the [OneOf] trait and `is_<slot>`/`as_<slot>` accessors.
//! * serde - an optional externally-tagged representation, `{"slot": payload}`.
//!
//! ```rust
//! use oneof::one_of;
//!
//! #[derive(Debug, PartialEq, Hash)]
//! pub struct Created {
//!     pub id: u32,
//! }
//!
//! #[derive(Debug, PartialEq, Hash)]
//! pub struct Updated {
//!     pub id: u32,
//!     pub fields: Vec<String>,
//! }
//!
//! #[one_of]
//! #[derive(Debug)]
//! pub struct Event {
//!     created: Option<Created>,
//!     updated: Option<Updated>,
//! }
//!
//! fn main() {
//!     let event = Event::from_created(Created { id: 1 });
//!
//!     // Exactly one handler per slot, the occupied slot's handler runs
//!     let summary = event
//!         .map(
//!             |created| format!("created {}", created.id),
//!             |updated| format!("updated {} ({} fields)", updated.id, updated.fields.len()),
//!         )
//!         .unwrap();
//!     assert_eq!(summary, "created 1");
//!
//!     // Every payload type is distinct, so `From` is available
//!     let event: Event = Updated { id: 2, fields: vec!["name".to_string()] }.into();
//!     assert!(event.is_updated());
//!
//!     // Handlers may be left out of the `or_else` forms
//!     let label = event.map_or_else(|| "other", None, Some(&mut |_: &Updated| "updated"));
//!     assert_eq!(label, "updated");
//!
//!     // And `TryFrom` goes the other way, handing the value back on a mismatch
//!     let event = Event::from_created(Created { id: 3 });
//!     let event = Updated::try_from(event).unwrap_err();
//!     let created = Created::try_from(event).unwrap();
//!     assert_eq!(created.id, 3);
//! }
//! ```
//!
//! # Slots
//! Only private fields of type `Option<T>` (also spelled `std::option::Option<T>` or
//! `core::option::Option<T>`) are slots, in declaration order. Anything else is left alone
//! and is initialized with `Default::default()` by the generated constructor. A private
//! optional field can be opted out with `#[one_of(skip)]`.
//!
//! Generated method names are built from the field name without leading underscores or a
//! raw identifier prefix, so `_created` gets `from_created`, `on_created`, `is_created`
//! and `as_created`.
//!
//! # Dispatch
//! All dispatch methods look at the slots in declaration order and stop at the first
//! match. `map` and `visit` take one handler per slot and fail with [NoVariantOccupied]
//! when nothing is occupied:
//! ```rust
//! # use oneof::one_of;
//! #[one_of(no_hash)]
//! pub struct Reading {
//!     celsius: Option<f64>,
//!     raw: Option<u16>,
//! }
//!
//! fn main() {
//!     let reading = Reading::from_raw(512);
//!     let shown = reading
//!         .map(|celsius| format!("{celsius}C"), |raw| format!("raw {raw}"))
//!         .unwrap();
//!     assert_eq!(shown, "raw 512");
//!
//!     let mut visited = 0;
//!     reading.visit(|_| (), |_| visited += 1).unwrap();
//!     assert_eq!(visited, 1);
//!
//!     // The private constructor can build an empty value
//!     let empty = Reading::new(None, None);
//!     let error = empty.map(|_| (), |_| ()).unwrap_err();
//!     assert!(error.owner().ends_with("::Reading"));
//!     assert_eq!(error.expected(), ["f64", "u16"]);
//! }
//! ```
//! `map_or_else` and `visit_or_else` take a fallback followed by an optional handler per
//! slot. The first slot that is occupied *and* has a handler wins, otherwise the fallback
//! runs. These never fail.
//!
//! # Equality and hashing
//! Two values are equal when they are the same value, or when exactly one slot is occupied
//! on both sides with equal payloads and every other slot is empty on both sides. In
//! particular two distinct empty values are *not* equal. Every payload type must implement
//! `PartialEq` and `Hash`; use `#[one_of(no_hash)]` for payloads without `Hash` and
//! `#[one_of(eq)]` to also implement `Eq`.
//!
//! `PartialEq`, `Eq`, `Hash` and (with `serde`) `Serialize`/`Deserialize` are implemented by
//! the macro, so deriving them as well is an error.
//!
//! # Hand-written constructors
//! Every factory goes through a private `fn new(slot: Option<T>, ...) -> Self`. To provide
//! it yourself, declare the struct and its impl together with [one_of_block]:
//! ```rust
//! oneof::one_of_block! {
//!     #[one_of(eq)]
//!     #[derive(Debug)]
//!     pub struct Command {
//!         start: Option<String>,
//!         stop: Option<u32>,
//!         issued: u64,
//!     }
//!
//!     impl Command {
//!         fn new(start: Option<String>, stop: Option<u32>) -> Self {
//!             Self { start, stop, issued: 42 }
//!         }
//!
//!         pub fn issued(&self) -> u64 {
//!             self.issued
//!         }
//!     }
//! }
//!
//! fn main() {
//!     let command = Command::from_stop(9);
//!     assert_eq!(command.issued(), 42);
//!     assert_eq!(command, Command::from_stop(9));
//! }
//! ```
//!
//! # serde
//! With the `serde` feature (on by default) and `#[one_of(serde)]`, a value is written as a
//! map with a single entry keyed by the occupied slot. An empty value is an empty map.
//! ```rust
//! # use oneof::one_of;
//! #[derive(Debug, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
//! pub struct Text(pub String);
//!
//! #[one_of(serde)]
//! pub struct Message {
//!     text: Option<Text>,
//!     number: Option<i64>,
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let message = Message::from_number(7);
//!     let serialized = serde_json::to_string(&message)?;
//!     assert_eq!(serialized, r#"{"number":7}"#);
//!
//!     let deserialized: Message = serde_json::from_str(r#"{"text":"hi"}"#)?;
//!     assert_eq!(deserialized.as_text(), Some(&Text("hi".to_string())));
//!
//!     assert!(serde_json::from_str::<Message>(r#"{"text":"hi","number":7}"#).is_err());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "serde")]
/// serde helpers
pub mod serde;

mod error;

pub use error::NoVariantOccupied;

pub use oneof_macro::one_of;

pub use oneof_macro::one_of_block;

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "serde")]
    pub use crate::serde::__private as serde;

    pub use core::cmp::{Eq, PartialEq};
    pub use core::convert::{From, TryFrom};
    pub use core::default::Default;
    pub use core::fmt;
    pub use core::hash::{Hash, Hasher};
    pub use core::marker::PhantomData;
    pub use core::ops::{FnMut, FnOnce};
    pub use core::option::Option;
    pub use core::ptr::eq as ptr_eq;
    pub use core::result::Result;

    pub use std::string::String;
}

/// Implemented for all types with the [macro@one_of] attribute.
pub trait OneOf {
    /// Full path of the type, e.g. `my_crate::events::Event`.
    const NAME: &'static str;

    /// PascalCase names of the slots, in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Payload type of each slot, as written in the declaration.
    const PAYLOAD_TYPES: &'static [&'static str];

    /// Index of the first occupied slot.
    fn occupied_index(&self) -> Option<usize>;

    /// Name of the first occupied slot.
    fn variant_name(&self) -> Option<&'static str> {
        self.occupied_index()
            .and_then(|index| Self::VARIANTS.get(index).copied())
    }

    /// Whether no slot is occupied.
    fn is_vacant(&self) -> bool {
        self.occupied_index().is_none()
    }
}
