//! Immutable, chained request context.
//!
//! # Responsibilities
//! - Carry request-scoped values through call chains with fixed signatures
//! - Derive new contexts without touching the parent
//! - Look values up by key, newest entry first
//!
//! # Design Decisions
//! - Each derivation allocates one `Arc` node pointing at its parent
//! - Keys compare by type *and* value, so two key types never collide
//! - Values are type-erased; callers downcast with [`Context::get`]
//! - Dropping unlinks the chain in a loop, so chain length never bounds
//!   stack depth

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased key stored in a context node.
trait ErasedKey: Send + Sync + fmt::Debug {
    fn matches(&self, other: &dyn Any) -> bool;
}

impl<K> ErasedKey for K
where
    K: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn matches(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<K>().is_some_and(|other| other == self)
    }
}

struct Node {
    parent: Context,
    key: Box<dyn ErasedKey>,
    value: Arc<dyn Any + Send + Sync>,
}

/// An immutable key/value context.
///
/// Cloning is a single reference count bump. The empty context is
/// [`Context::background`].
#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that additionally maps `key` to `value`.
    ///
    /// `self` is left unchanged. A later entry shadows an earlier one with
    /// an equal key.
    pub fn with_value<K, V>(&self, key: K, value: V) -> Context
    where
        K: PartialEq + fmt::Debug + Send + Sync + 'static,
        V: Any + Send + Sync,
    {
        Context {
            node: Some(Arc::new(Node {
                parent: self.clone(),
                key: Box::new(key),
                value: Arc::new(value),
            })),
        }
    }

    /// Raw lookup of the value bound to `key`, if any.
    pub fn value<K>(&self, key: &K) -> Option<&(dyn Any + Send + Sync)>
    where
        K: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            if (*node.key).matches(key) {
                return Some(&*node.value);
            }
            current = node.parent.node.as_deref();
        }
        None
    }

    /// Typed lookup: `None` when the key is absent or bound to another type.
    pub fn get<K, T>(&self, key: &K) -> Option<&T>
    where
        K: PartialEq + fmt::Debug + Send + Sync + 'static,
        T: Any,
    {
        self.value(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Number of entries in the chain, shadowed ones included.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.node.as_deref();
        }
        depth
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let mut next = self.node.take();
        while let Some(node) = next {
            // Stop at the first node still shared with another context.
            next = match Arc::into_inner(node) {
                Some(mut node) => node.parent.node.take(),
                None => None,
            };
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            list.entry(&node.key);
            current = node.parent.node.as_deref();
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestKey {
        A,
        B,
    }

    #[derive(Debug, PartialEq)]
    struct OtherKey(u8);

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.value(&TestKey::A).is_none());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_with_value_does_not_touch_parent() {
        let parent = Context::background().with_value(TestKey::A, 1u32);
        let child = parent.with_value(TestKey::B, "two");

        assert_eq!(parent.get::<_, u32>(&TestKey::A), Some(&1));
        assert!(parent.value(&TestKey::B).is_none());
        assert_eq!(child.get::<_, u32>(&TestKey::A), Some(&1));
        assert_eq!(child.get::<_, &str>(&TestKey::B), Some(&"two"));
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn test_newest_entry_wins() {
        let ctx = Context::background()
            .with_value(TestKey::A, 1u32)
            .with_value(TestKey::A, 2u32);
        assert_eq!(ctx.get::<_, u32>(&TestKey::A), Some(&2));
    }

    #[test]
    fn test_keys_of_different_types_do_not_collide() {
        let ctx = Context::background().with_value(OtherKey(0), "other");
        assert!(ctx.value(&TestKey::A).is_none());
        assert!(ctx.value(&0u8).is_none());
        assert!(ctx.value(&OtherKey(1)).is_none());
        assert_eq!(ctx.get::<_, &str>(&OtherKey(0)), Some(&"other"));
    }

    #[test]
    fn test_wrong_type_downcast_is_none() {
        let ctx = Context::background().with_value(TestKey::A, 22i64);
        assert!(ctx.value(&TestKey::A).is_some());
        assert!(ctx.get::<_, String>(&TestKey::A).is_none());
    }

    #[test]
    fn test_context_is_shareable_across_threads() {
        let ctx = Context::background().with_value(TestKey::A, 7u32);
        let handle = {
            let ctx = ctx.clone();
            std::thread::spawn(move || ctx.get::<_, u32>(&TestKey::A).copied())
        };
        assert_eq!(handle.join().unwrap(), Some(7));
    }

    #[test]
    fn test_dropping_a_long_chain() {
        let mut ctx = Context::background();
        for i in 0..200_000usize {
            ctx = ctx.with_value(i, i);
        }
        assert_eq!(ctx.depth(), 200_000);
        assert_eq!(ctx.get::<_, usize>(&0usize), Some(&0));
        drop(ctx);
    }

    #[test]
    fn test_dropping_a_branch_keeps_shared_prefix() {
        let mut trunk = Context::background();
        for i in 0..150_000u32 {
            trunk = trunk.with_value(i, i);
        }
        let mut branch = trunk.clone();
        for i in 0..150_000u64 {
            branch = branch.with_value(i, i);
        }

        drop(branch);
        assert_eq!(trunk.depth(), 150_000);
        assert_eq!(trunk.get::<_, u32>(&7u32), Some(&7));
        drop(trunk);
    }
}
