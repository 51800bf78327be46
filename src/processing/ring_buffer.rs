// BUFFER COMPONENT ------------------------------------------------------------

/// Fixed-capacity FIFO that overwrites its oldest element when full.
///
/// One extra slot is allocated so that `head == tail` always means empty.
/// `head` is the next slot to write, `tail` the oldest element.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buffer: Vec<T>,
    slots: usize,
    head: usize,
    tail: usize,
}

impl<T: Clone + Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let slots = capacity + 1;
        Self {
            buffer: vec![T::default(); slots],
            slots,
            head: 0,
            tail: 0,
        }
    }

    pub fn push(&mut self, element: T) {
        self.buffer[self.head] = element;
        self.head = (self.head + 1) % self.slots;
        if self.head == self.tail {
            self.tail = (self.tail + 1) % self.slots; // Overwrite oldest if full
        }
    }

    /// Removes and returns the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let oldest = std::mem::take(&mut self.buffer[self.tail]);
        self.tail = (self.tail + 1) % self.slots;
        Some(oldest)
    }

    /// Copies the held elements out, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        if self.tail <= self.head {
            self.buffer[self.tail..self.head].to_vec()
        } else {
            self.buffer[self.tail..]
                .iter()
                .chain(self.buffer[..self.head].iter())
                .cloned()
                .collect()
        }
    }

    pub fn len(&self) -> usize {
        (self.head + self.slots - self.tail) % self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.slots - 1
    }

    /// Empties the buffer, keeping its allocation.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }
}
