//! Tag set with a closed algebra
//!
//! Every set produced from a [`TagSet`] (algebra, filtering, copying) holds
//! [`Tag`] values, whatever the operands were built from: plain strings,
//! string sets, or other tag sets are coerced on the way in.
//!
//! # Examples
//!
//! ```
//! use spritetags::domain::tags::TagSet;
//!
//! let tags = TagSet::from_iter(["hell", "hello", "love", "bite"]);
//! let picked = tags.filter_and(["hell", "lo"]);
//! assert_eq!(picked, TagSet::from_iter(["hello"]));
//!
//! let merged = &picked | ["-sad"];
//! assert!(merged.contains("-sad"));
//! ```

use super::tag::Tag;
use crate::error::{Result, SpriteTagsError};
use std::collections::{btree_set, BTreeSet, HashSet};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

/// A set of unique tags, iterated in rendered-text order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, coercing raw text. Returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Insert raw text with an explicit polarity
    pub fn insert_with_polarity(&mut self, text: &str, added: bool) -> bool {
        self.tags.insert(Tag::with_polarity(text, added))
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Membership by rendered text, so `"-sad"` and `"sad"` are different tags
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Shallow copy; provided alongside the other derived-set operations
    pub fn copy(&self) -> TagSet {
        self.clone()
    }

    /// Rendered text of every tag, for handing back to callers that only
    /// understand plain strings
    pub fn to_strings(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.as_str().to_string()).collect()
    }

    /// Find a tag matching every given criterion.
    ///
    /// Returns `InvalidQuery` when neither `name` nor `added` is given. When
    /// several tags match, the first in iteration order is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use spritetags::domain::tags::{Tag, TagSet};
    ///
    /// let tags = TagSet::from_iter(["hello", "-goodbye"]);
    /// assert_eq!(tags.find(None, Some(false)).unwrap(), Some(&Tag::new("-goodbye")));
    /// assert_eq!(tags.find(Some("hello"), Some(false)).unwrap(), None);
    /// assert!(tags.find(None, None).is_err());
    /// ```
    pub fn find(&self, name: Option<&str>, added: Option<bool>) -> Result<Option<&Tag>> {
        if name.is_none() && added.is_none() {
            return Err(SpriteTagsError::InvalidQuery);
        }

        Ok(self.tags.iter().find(|tag| {
            name.map_or(true, |name| tag.name() == name)
                && added.map_or(true, |added| tag.added() == added)
        }))
    }

    /// Tags whose rendered text contains ANY of the substrings
    pub fn filter_or<I>(&self, substrings: I) -> TagSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let substrings = collect_substrings(substrings);
        self.tags
            .iter()
            .filter(|tag| substrings.iter().any(|s| tag.as_str().contains(s.as_str())))
            .cloned()
            .collect()
    }

    /// Tags whose rendered text contains EACH of the substrings
    pub fn filter_and<I>(&self, substrings: I) -> TagSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let substrings = collect_substrings(substrings);
        self.tags
            .iter()
            .filter(|tag| substrings.iter().all(|s| tag.as_str().contains(s.as_str())))
            .cloned()
            .collect()
    }

    /// Tags with the given polarity
    pub fn filter_added(&self, added: bool) -> TagSet {
        self.tags
            .iter()
            .filter(|tag| tag.added() == added)
            .cloned()
            .collect()
    }
}

fn collect_substrings<I>(substrings: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    substrings
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect()
}

/// Operators with a plain string set on the left, owned or borrowed, against
/// an owned or borrowed tag set on the right
macro_rules! reflected_ops {
    ($set:ident, $method:ident => $op:ident::$op_fn:ident) => {
        impl<S: AsRef<str>> $op<TagSet> for $set<S> {
            type Output = TagSet;

            fn $op_fn(self, rhs: TagSet) -> TagSet {
                coerce(self).$method(rhs)
            }
        }

        impl<'r, S: AsRef<str>> $op<&'r TagSet> for $set<S> {
            type Output = TagSet;

            fn $op_fn(self, rhs: &'r TagSet) -> TagSet {
                coerce(self).$method(rhs)
            }
        }

        impl<'l, S: AsRef<str>> $op<TagSet> for &'l $set<S> {
            type Output = TagSet;

            fn $op_fn(self, rhs: TagSet) -> TagSet {
                coerce(self).$method(rhs)
            }
        }

        impl<'l, 'r, S: AsRef<str>> $op<&'r TagSet> for &'l $set<S> {
            type Output = TagSet;

            fn $op_fn(self, rhs: &'r TagSet) -> TagSet {
                coerce(self).$method(rhs)
            }
        }
    };
}

/// Plain strings to tags, polarity inferred from each one's marker
fn coerce<I>(items: I) -> TagSet
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items.into_iter().map(Tag::new).collect()
}

/// Generates, for each named set operation, the method, the operator for owned
/// and borrowed tag sets, the assigning operator, and the reflected operators
/// for plain string sets on the left. Operands are coerced into a `TagSet`
/// before the `BTreeSet` operation runs, so results are always tags.
macro_rules! tag_set_algebra {
    ($($method:ident => $op:ident::$op_fn:ident, $assign:ident::$assign_fn:ident;)*) => {
        impl TagSet {
            $(
                pub fn $method<I>(&self, other: I) -> TagSet
                where
                    I: IntoIterator,
                    I::Item: Into<Tag>,
                {
                    let other: TagSet = other.into_iter().collect();
                    self.tags.$method(&other.tags).cloned().collect()
                }
            )*
        }

        $(
            impl<I> $op<I> for &TagSet
            where
                I: IntoIterator,
                I::Item: Into<Tag>,
            {
                type Output = TagSet;

                fn $op_fn(self, rhs: I) -> TagSet {
                    self.$method(rhs)
                }
            }

            impl<I> $op<I> for TagSet
            where
                I: IntoIterator,
                I::Item: Into<Tag>,
            {
                type Output = TagSet;

                fn $op_fn(self, rhs: I) -> TagSet {
                    self.$method(rhs)
                }
            }

            impl<I> $assign<I> for TagSet
            where
                I: IntoIterator,
                I::Item: Into<Tag>,
            {
                fn $assign_fn(&mut self, rhs: I) {
                    *self = self.$method(rhs);
                }
            }

            reflected_ops!(HashSet, $method => $op::$op_fn);
            reflected_ops!(BTreeSet, $method => $op::$op_fn);
        )*
    };
}

tag_set_algebra! {
    union => BitOr::bitor, BitOrAssign::bitor_assign;
    intersection => BitAnd::bitand, BitAndAssign::bitand_assign;
    difference => Sub::sub, SubAssign::sub_assign;
    symmetric_difference => BitXor::bitxor, BitXorAssign::bitxor_assign;
}

impl<T: Into<Tag>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TagSet {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Tag>> Extend<T> for TagSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tags.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = btree_set::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, "}}")
    }
}
