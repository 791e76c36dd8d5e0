use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector which can only be indexed by keys of type `Key`.
///
/// Variables, constraints and search nodes are all stored in a [`KeyedVec`]; the key type makes
/// it impossible to look up a node with a variable id.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// Returns the key the next pushed value will receive.
    pub fn next_key(&self) -> Key {
        Key::create_from_index(self.elements.len())
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    /// Iterate over the values in the vector.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (Key, &'_ Value)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, value)| (Key::create_from_index(index), value))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Make sure `key` can be used to index into the vector, filling new slots with
    /// `default_value`.
    pub(crate) fn accomodate(&mut self, key: Key, default_value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> FromIterator<Value> for KeyedVec<Key, Value> {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            key: PhantomData,
            elements: iter.into_iter().collect(),
        }
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_insertion_order() {
        let mut keyed_vec: KeyedVec<usize, char> = KeyedVec::default();
        let a = keyed_vec.push('a');
        let b = keyed_vec.push('b');

        assert_eq!((a, b), (0, 1));
        assert_eq!(keyed_vec[b], 'b');
        assert_eq!(keyed_vec.next_key(), 2);
    }

    #[test]
    fn accomodate_only_grows() {
        let mut keyed_vec: KeyedVec<usize, u32> = KeyedVec::default();
        keyed_vec.accomodate(3, 7);
        keyed_vec.accomodate(1, 9);

        assert_eq!(keyed_vec.iter().copied().collect::<Vec<_>>(), vec![7, 7, 7, 7]);
    }
}
