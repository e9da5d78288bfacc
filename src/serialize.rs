use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::debug;
use winnow::{
    Parser,
    ascii::{digit1, multispace0},
    combinator::{delimited, opt, separated},
    error::{StrContext, StrContextValue},
};

use crate::{BitSet, Error, Offset, Result};

impl BitSet {
    /// Compact text form, e.g. `[1,2,3,511]`.
    #[must_use]
    pub fn to_serialized_form(&self) -> String {
        self.to_string()
    }

    /// Replaces the contents of the set with the offsets in `payload`.
    ///
    /// The set is only touched once the whole payload has parsed and every
    /// offset is within this set's limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSerializedForm`] if the payload is not an
    /// array of integers, or [`Error::OutOfRange`] if it holds an offset this
    /// set cannot store.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_serialized_form(&mut self, payload: &str) -> Result<()> {
        let offsets = parse_offsets(payload)
            .and_then(|offsets| self.check_range(&offsets).map(|()| offsets))
            .inspect_err(|err| debug!(%err, "rejected serialized bit set"))?;
        self.clear();
        self.add(&offsets)?;
        debug!(len = self.len(), "repopulated bit set");
        Ok(())
    }
}

// JSON integer: optional `-`, no `+`, no leading zeros.
fn offset(input: &mut &str) -> winnow::Result<Offset> {
    (
        opt('-'),
        digit1.verify(|digits: &str| digits == "0" || !digits.starts_with('0')),
    )
        .take()
        .try_map(str::parse::<Offset>)
        .context(StrContext::Label("offset"))
        .context(StrContext::Expected(StrContextValue::Description(
            "integer without `+` or leading zeros",
        )))
        .parse_next(input)
}

fn offsets(input: &mut &str) -> winnow::Result<Vec<Offset>> {
    delimited(
        (
            '['.context(StrContext::Expected(StrContextValue::CharLiteral('['))),
            multispace0,
        ),
        separated(0.., offset, (multispace0, ',', multispace0)),
        (
            multispace0,
            ']'.context(StrContext::Label("array"))
                .context(StrContext::Expected(StrContextValue::CharLiteral(']')))
                .context(StrContext::Expected(StrContextValue::CharLiteral(','))),
        ),
    )
    .parse_next(input)
}

pub(crate) fn parse_offsets(payload: &str) -> Result<Vec<Offset>> {
    delimited(multispace0, offsets, multispace0)
        .parse(payload)
        .map_err(|e| Error::MalformedSerializedForm(e.to_string()))
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, offset) in self.values().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{offset}")?;
        }
        f.write_str("]")
    }
}

impl FromStr for BitSet {
    type Err = Error;

    fn from_str(payload: &str) -> Result<Self> {
        Self::from_values(&parse_offsets(payload)?)
    }
}

impl Serialize for BitSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values())
    }
}

impl<'de> Deserialize<'de> for BitSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let offsets = Vec::<Offset>::deserialize(deserializer)?;
        Self::from_values(&offsets).map_err(de::Error::custom)
    }
}
