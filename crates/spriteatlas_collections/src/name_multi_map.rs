use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use thiserror::Error;

/// A record that can be stored in a [`NameMultiMap`].
///
/// The name is read once on insertion to pick a bucket, so implementors
/// must not allow the name to change while the record is stored.
pub trait Named {
    fn name(&self) -> &str;
}

/// Returned by by-name lookups when an empty name is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("name cannot be an empty string")]
pub struct EmptyName;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// An opaque identity of a record inside of a [`NameMultiMap`].
///
/// Handles are unique for the whole process, so a handle obtained from one
/// collection never addresses a record in another one. Two records with equal
/// names and equal contents still get different handles.
pub struct Handle<T> {
    id: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn next() -> Self {
        Self {
            id: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id).finish()
    }
}

#[derive(Debug)]
struct Entry<T> {
    handle: Handle<T>,
    value: T,
}

/// A mapping from a name to an ordered list of records sharing that name.
///
/// Buckets are kept in the order their names were first inserted, records
/// inside of a bucket are kept in insertion order. A bucket that becomes empty
/// is dropped, so re-adding the name later puts it at the end.
///
/// Records are removed by [`Handle`], never by value, so duplicates
/// with identical contents remain distinguishable.
#[derive(Debug)]
pub struct NameMultiMap<T> {
    buckets: IndexMap<String, Vec<Entry<T>>>,
    len: usize,
}

impl<T> Default for NameMultiMap<T> {
    fn default() -> Self {
        Self {
            buckets: Default::default(),
            len: 0,
        }
    }
}

fn require_name(name: &str) -> Result<&str, EmptyName> {
    match name.is_empty() {
        true => Err(EmptyName),
        false => Ok(name),
    }
}

impl<T: Named> NameMultiMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all of the names.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a record to the bucket of its name.
    pub fn add(&mut self, value: T) -> Handle<T> {
        let handle = Handle::next();
        self.buckets
            .entry(value.name().to_owned())
            .or_default()
            .push(Entry { handle, value });
        self.len += 1;
        handle
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Vec<Handle<T>> {
        values.into_iter().map(|v| self.add(v)).collect()
    }

    /// Removes the exact record behind `handle`. Unknown handles are ignored.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let (bucket, position) = self.locate(handle)?;

        let entries = &mut self.buckets[bucket];
        let entry = entries.remove(position);
        if entries.is_empty() {
            self.buckets.shift_remove_index(bucket);
        }

        self.len -= 1;
        Some(entry.value)
    }

    /// Drops the whole bucket for `name`, returning its records in order.
    pub fn remove_by_name(&mut self, name: &str) -> Vec<T> {
        let removed: Vec<T> = self
            .buckets
            .shift_remove(name)
            .map(|entries| entries.into_iter().map(|e| e.value).collect())
            .unwrap_or_default();

        self.len -= removed.len();
        removed
    }

    pub fn remove_all<I: IntoIterator<Item = Handle<T>>>(&mut self, handles: I) -> Vec<T> {
        handles
            .into_iter()
            .filter_map(|h| self.remove(h))
            .collect()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// A snapshot of every record, bucket by bucket.
    pub fn list_all(&self) -> Vec<&T> {
        self.values().collect()
    }

    pub fn list_by_name(&self, name: &str) -> Result<Vec<&T>, EmptyName> {
        let name = require_name(name)?;
        Ok(self
            .buckets
            .get(name)
            .map(|entries| entries.iter().map(|e| &e.value).collect())
            .unwrap_or_default())
    }

    pub fn first_by_name(&self, name: &str) -> Result<Option<&T>, EmptyName> {
        let name = require_name(name)?;
        Ok(self
            .buckets
            .get(name)
            .and_then(|entries| entries.first())
            .map(|e| &e.value))
    }

    pub fn handles_by_name(&self, name: &str) -> Result<Vec<Handle<T>>, EmptyName> {
        let name = require_name(name)?;
        Ok(self
            .buckets
            .get(name)
            .map(|entries| entries.iter().map(|e| e.handle).collect())
            .unwrap_or_default())
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.locate(handle).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.locate(handle)
            .map(|(bucket, position)| &self.buckets[bucket][position].value)
    }

    /// Mutable access to a stored record. The record's name must stay the same.
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let (bucket, position) = self.locate(handle)?;
        Some(&mut self.buckets[bucket][position].value)
    }

    /// Distinct names in bucket order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flatten().map(|e| &e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.buckets.values().flatten().map(|e| (e.handle, &e.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        self.buckets
            .values_mut()
            .flatten()
            .map(|e| (e.handle, &mut e.value))
    }

    fn locate(&self, handle: Handle<T>) -> Option<(usize, usize)> {
        self.buckets
            .values()
            .enumerate()
            .find_map(|(bucket, entries)| {
                entries
                    .iter()
                    .position(|e| e.handle == handle)
                    .map(|position| (bucket, position))
            })
    }
}

impl<T: Named> FromIterator<T> for NameMultiMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::default();
        map.add_all(iter);
        map
    }
}
