use std::ops;
use std::slice::Iter;

#[cfg(feature = "dataset-conll")]
pub mod conll;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    items: Vec<T>,
}

impl<T> Dataset<T> {
    pub fn new() -> Self {
        Dataset { items: vec![] }
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Dataset { items: items }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Dataset { items: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> ops::Index<usize> for Dataset<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        ops::Index::index(&self.items, index)
    }
}

impl<T> ops::Index<ops::RangeFull> for Dataset<T> {
    type Output = [T];

    #[inline]
    fn index(&self, _index: ops::RangeFull) -> &[T] {
        &self.items
    }
}
