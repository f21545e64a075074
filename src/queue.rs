/// A FIFO queue over an append-only backing sequence with a read cursor.
///
/// Only used transiently by the level-order rendering; the write cursor is
/// the backing vector's length. Popped slots are vacated so the backing
/// storage never yields a value twice.
#[derive(Debug)]
pub(crate) struct SeqQueue<T> {
    items: Vec<Option<T>>,
    head: usize,
}

impl<T> SeqQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            head: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head == self.items.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len() - self.head
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(Some(item));
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        let item = self.items.get_mut(self.head)?.take();
        self.head += 1;
        item
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn test_new_queue_is_empty() {
        let queue: SeqQueue<u8> = SeqQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_pop_past_the_write_cursor_yields_nothing() {
        let mut queue = SeqQueue::new();
        queue.push(1);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[proptest(fork = false)]
    fn test_pops_in_insertion_order(items: Vec<u8>) {
        let mut queue = SeqQueue::new();
        for item in &items {
            queue.push(*item);
        }
        prop_assert_eq!(queue.len(), items.len());

        let mut drained = Vec::new();
        while let Some(item) = queue.pop() {
            drained.push(item);
        }
        prop_assert_eq!(drained, items);
    }

    #[proptest(fork = false)]
    fn test_interleaved_pushes_keep_fifo_order(front: Vec<u8>, back: Vec<u8>) {
        let mut queue = SeqQueue::new();
        for item in &front {
            queue.push(*item);
        }
        let mut drained = Vec::new();
        for _ in 0..front.len() / 2 {
            drained.extend(queue.pop());
        }
        for item in &back {
            queue.push(*item);
        }
        while let Some(item) = queue.pop() {
            drained.push(item);
        }

        let mut expected = front;
        expected.extend(back);
        prop_assert_eq!(drained, expected);
    }
}
