/// A key-value pair owned by a single node.
#[derive(Debug)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Entry { key, value }
    }

    pub fn as_pair(&self) -> (&T, &U) {
        (&self.key, &self.value)
    }

    pub fn into_pair(self) -> (T, U) {
        (self.key, self.value)
    }
}
