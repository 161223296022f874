use std::{fmt, marker::PhantomData};

use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

use crate::{ExResult, ExprTree, Postfix, Token};

// All types are represented as strings. Tokens are their text, postfix sequences and
// trees are space separated symbols in postfix order. Deserialization does not limit the
// number or the length of the symbols.

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Postfix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for ExprTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_postfix().to_string())
    }
}

#[derive(Debug)]
struct StrVisitor<V> {
    expecting: &'static str,
    from_str: fn(&str) -> ExResult<V>,
    dummy: PhantomData<V>,
}

impl<V> StrVisitor<V> {
    fn new(expecting: &'static str, from_str: fn(&str) -> ExResult<V>) -> Self {
        StrVisitor {
            expecting,
            from_str,
            dummy: PhantomData,
        }
    }
}

impl<'de, V> Visitor<'de> for StrVisitor<V> {
    type Value = V;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expecting)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        (self.from_str)(v).map_err(|ex_err| E::custom(ex_err.to_string()))
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(StrVisitor::new("an ascii token", Token::new))
    }
}

impl<'de> Deserialize<'de> for Postfix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(StrVisitor::new(
            "space separated symbols in postfix order",
            Postfix::from_symbols,
        ))
    }
}

impl<'de> Deserialize<'de> for ExprTree {
    /// Rebuilds the tree with the default operators.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        fn tree_from_symbols(symbols: &str) -> ExResult<ExprTree> {
            crate::build(&Postfix::from_symbols(symbols)?)
        }
        deserializer.deserialize_str(StrVisitor::new(
            "a well-formed postfix expression",
            tree_from_symbols,
        ))
    }
}
