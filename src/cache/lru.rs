//! LRU List Module
//!
//! Recency ordering for the store: a doubly-linked list of keys stored in a
//! slab so that promotion, removal and eviction are all O(1).

// == Node Handle ==
/// Position of a key inside an [`LruList`].
///
/// Handles stay valid until the node is removed; a freed slot may be reused
/// by a later insertion.
pub type NodeId = usize;

#[derive(Debug, Default)]
struct Node {
    key: String,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == LRU List ==
/// Tracks access order for LRU eviction.
///
/// - Head = most recently used
/// - Tail = least recently used
#[derive(Debug, Default)]
pub struct LruList {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts a key as the most recently used and returns its handle.
    pub fn push_front(&mut self, key: String) -> NodeId {
        let id = self.alloc(key);
        self.link_front(id);
        id
    }

    // == Push Back ==
    /// Inserts a key as the least recently used and returns its handle.
    pub fn push_back(&mut self, key: String) -> NodeId {
        let id = self.alloc(key);
        self.nodes[id].prev = self.tail;
        self.nodes[id].next = None;
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    // == Move To Front ==
    /// Marks the node as most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id) {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    // == Remove ==
    /// Unlinks the node and returns its key. The slot is recycled.
    ///
    /// `id` must be a live handle; the owning store guarantees this.
    pub fn remove(&mut self, id: NodeId) -> String {
        self.unlink(id);
        self.len -= 1;
        self.free.push(id);
        std::mem::take(&mut self.nodes[id].key)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<String> {
        let tail = self.tail?;
        Some(self.remove(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    #[allow(dead_code)]
    pub fn peek_back(&self) -> Option<&str> {
        self.tail.map(|tail| self.nodes[tail].key.as_str())
    }

    // == Iter ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    /// Drops every node and releases the slab.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of linked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Internal Helpers ==
    fn alloc(&mut self, key: String) -> NodeId {
        self.len += 1;
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn link_front(&mut self, id: NodeId) {
        self.nodes[id].prev = None;
        self.nodes[id].next = self.head;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[id].prev = None;
        self.nodes[id].next = None;
    }
}

// == Iterator ==
/// Iterator over keys, most recently used first.
pub struct Iter<'a> {
    list: &'a LruList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = &self.list.nodes[id];
        self.cursor = node.next;
        Some(node.key.as_str())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &LruList) -> Vec<&str> {
        list.iter().collect()
    }

    #[test]
    fn test_list_new() {
        let list = LruList::new();
        assert_eq!(list.len(), 0);
        assert_eq!(list.peek_back(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = LruList::new();

        list.push_front("key1".to_string());
        list.push_front("key2".to_string());
        list.push_front("key3".to_string());

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        assert_eq!(list.peek_back(), Some("key1"));
    }

    #[test]
    fn test_push_back_appends_as_oldest() {
        let mut list = LruList::new();

        list.push_back("a".to_string());
        list.push_back("b".to_string());
        list.push_back("c".to_string());

        assert_eq!(keys(&list), vec!["a", "b", "c"]);
        assert_eq!(list.peek_back(), Some("c"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = LruList::new();

        let a = list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.push_front("c".to_string());

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_back(), Some("b"));
    }

    #[test]
    fn test_move_head_is_noop() {
        let mut list = LruList::new();

        list.push_front("a".to_string());
        let b = list.push_front("b".to_string());

        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_pop_back_evicts_oldest() {
        let mut list = LruList::new();

        list.push_front("key1".to_string());
        list.push_front("key2".to_string());
        list.push_front("key3".to_string());

        assert_eq!(list.pop_back(), Some("key1".to_string()));
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back(), Some("key2".to_string()));
        assert_eq!(list.pop_back(), Some("key3".to_string()));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_remove_middle() {
        let mut list = LruList::new();

        list.push_front("key1".to_string());
        let middle = list.push_front("key2".to_string());
        list.push_front("key3".to_string());

        assert_eq!(list.remove(middle), "key2");
        assert_eq!(keys(&list), vec!["key3", "key1"]);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut list = LruList::new();

        let a = list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.remove(a);

        let c = list.push_front("c".to_string());
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_order_after_multiple_moves() {
        let mut list = LruList::new();

        let a = list.push_front("a".to_string());
        let b = list.push_front("b".to_string());
        let c = list.push_front("c".to_string());

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        assert_eq!(list.pop_back(), Some("a".to_string()));
        assert_eq!(list.pop_back(), Some("c".to_string()));
        assert_eq!(list.pop_back(), Some("b".to_string()));
    }

    #[test]
    fn test_clear() {
        let mut list = LruList::new();

        list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);

        list.push_back("c".to_string());
        assert_eq!(keys(&list), vec!["c"]);
    }
}
