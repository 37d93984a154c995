use vlist::KeyCacheKey;

/// Key bound for lists driven through the adapter.
///
/// Whatever the engine's size model needs (`Hash + Eq` with `std`, `Ord` without), plus `Clone`
/// because positioned items carry their key.
pub trait ListKey: KeyCacheKey + Clone {}
impl<T: KeyCacheKey + Clone> ListKey for T {}
